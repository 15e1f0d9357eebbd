//! Rollbook CLI
//!
//! One-shot subcommands plus the interactive menu loop.

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand, ValueEnum};
use rollbook::config::Durability;
use rollbook::input::{self, InputError};
use rollbook::seed::{BookGenerator, StudentGenerator};
use rollbook::{Catalog, Config, RollbookError, RosterService};
use tracing_subscriber::{fmt, EnvFilter};

type CliResult<T> = std::result::Result<T, Box<dyn Error>>;

/// Rollbook
#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(about = "Sorted student roster and book catalog stored as JSON files")]
#[command(version)]
struct Args {
    /// Directory holding the record files
    #[arg(short, long, default_value = ".")]
    data_dir: String,

    /// Skip fsync when saving
    #[arg(long)]
    no_fsync: bool,

    /// Records generated when a file is bootstrapped
    #[arg(long, default_value = "10")]
    seed_count: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Student roster operations
    Students {
        #[command(subcommand)]
        action: StudentCommand,
    },

    /// Book catalog operations
    Books {
        #[command(subcommand)]
        action: BookCommand,
    },

    /// Interactive menu
    Menu {
        /// Which collection to manage
        #[arg(value_enum)]
        collection: Collection,
    },
}

#[derive(Subcommand, Debug)]
enum StudentCommand {
    /// Add a new student
    Add {
        name: String,
        roll_number: String,
        grade: String,
    },

    /// List all students
    List,

    /// Look up a student by roll number
    Search { roll_number: String },

    /// Change a student's grade
    Update { roll_number: String, grade: String },

    /// Replace the roster with generated students
    Seed {
        #[arg(short, long)]
        count: Option<usize>,

        /// Fixed generator seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum BookCommand {
    /// Add a new book
    Add {
        title: String,
        author: String,
        year: String,
    },

    /// List all books
    List,

    /// Find books by title (case-insensitive)
    Search { title: String },

    /// Replace the catalog with generated books
    Seed {
        #[arg(short, long)]
        count: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Collection {
    Students,
    Books,
}

fn main() {
    // Logs go to stderr so command output stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rollbook=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("Rollbook v{}", rollbook::VERSION);

    let durability = if args.no_fsync {
        Durability::BufferedOnly
    } else {
        Durability::Fsync
    };

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .durability(durability)
        .seed_count(args.seed_count)
        .build();

    if let Err(e) = run(args.command, config) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: Config) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    match command {
        Commands::Students { action } => {
            let roster = RosterService::open(config)?;
            run_student_command(&roster, action)
        }
        Commands::Books { action } => {
            let catalog = Catalog::open(config)?;
            run_book_command(&catalog, action)
        }
        Commands::Menu { collection } => match collection {
            Collection::Students => {
                let roster = RosterService::open(config)?;
                bootstrap_roster(&roster)?;
                student_menu(&roster, &mut stdin.lock(), &mut stdout.lock())
            }
            Collection::Books => {
                let catalog = Catalog::open(config)?;
                bootstrap_catalog(&catalog)?;
                book_menu(&catalog, &mut stdin.lock(), &mut stdout.lock())
            }
        },
    }
}

// =============================================================================
// Bootstrapping
// =============================================================================

fn bootstrap_roster(roster: &RosterService) -> CliResult<()> {
    let config = roster.config();
    let mut generator = StudentGenerator::from_entropy(config.key_range());
    roster.bootstrap(&mut generator, config.seed_count)?;
    Ok(())
}

fn bootstrap_catalog(catalog: &Catalog) -> CliResult<()> {
    let config = catalog.config();
    let mut generator = BookGenerator::from_entropy(config.max_publication_year);
    catalog.bootstrap(&mut generator, config.seed_count)?;
    Ok(())
}

// =============================================================================
// One-shot Commands
// =============================================================================

fn run_student_command(roster: &RosterService, action: StudentCommand) -> CliResult<()> {
    if let StudentCommand::Seed { count, seed } = action {
        let config = roster.config();
        let mut generator = match seed {
            Some(seed) => StudentGenerator::new(config.key_range(), seed),
            None => StudentGenerator::from_entropy(config.key_range()),
        };
        let written = roster.seed(&mut generator, count.unwrap_or(config.seed_count))?;
        println!("Seeded {} students into {}", written, roster.path().display());
        return Ok(());
    }

    bootstrap_roster(roster)?;
    let key_range = roster.config().key_range();

    match action {
        StudentCommand::Seed { .. } => {}
        StudentCommand::Add {
            name,
            roll_number,
            grade,
        } => {
            let name = input::parse_name(&name)?;
            let roll_number = input::parse_roll_number(&roll_number, &key_range)?;
            let grade = input::parse_grade(&grade)?;
            roster.add(&name, roll_number, grade)?;
            println!("Student added successfully!");
        }
        StudentCommand::List => print_students(roster, &mut io::stdout())?,
        StudentCommand::Search { roll_number } => {
            let roll_number = input::parse_lookup_key(&roll_number)?;
            print_search(roster, roll_number, &mut io::stdout())?;
        }
        StudentCommand::Update { roll_number, grade } => {
            let roll_number = input::parse_lookup_key(&roll_number)?;
            let grade = input::parse_grade(&grade)?;
            let student = roster.update(roll_number, grade)?;
            println!("Grade updated: {}", student);
        }
    }
    Ok(())
}

fn run_book_command(catalog: &Catalog, action: BookCommand) -> CliResult<()> {
    if let BookCommand::Seed { count, seed } = action {
        let config = catalog.config();
        let mut generator = match seed {
            Some(seed) => BookGenerator::new(config.max_publication_year, seed),
            None => BookGenerator::from_entropy(config.max_publication_year),
        };
        let written = catalog.seed(&mut generator, count.unwrap_or(config.seed_count))?;
        println!("Seeded {} books into {}", written, catalog.path().display());
        return Ok(());
    }

    bootstrap_catalog(catalog)?;
    let max_year = catalog.config().max_publication_year;

    match action {
        BookCommand::Seed { .. } => {}
        BookCommand::Add {
            title,
            author,
            year,
        } => {
            let title = input::parse_title(&title)?;
            let author = input::parse_name(&author)?;
            let year = input::parse_publication_year(&year, max_year)?;
            match catalog.find_exact(&title, &author)? {
                Some(existing) => println!("There is already such a book: {}", existing),
                None => {
                    catalog.add(&title, &author, year)?;
                    println!("Book added successfully!");
                }
            }
        }
        BookCommand::List => print_books(catalog, &mut io::stdout())?,
        BookCommand::Search { title } => print_title_search(catalog, &title, &mut io::stdout())?,
    }
    Ok(())
}

// =============================================================================
// Output
// =============================================================================

fn print_students(roster: &RosterService, out: &mut impl Write) -> CliResult<()> {
    let students = roster.list()?;
    if !students.is_empty() {
        writeln!(out, "Added students:")?;
        for student in students {
            writeln!(out, "{}", student)?;
        }
    }
    Ok(())
}

fn print_search(roster: &RosterService, roll_number: u32, out: &mut impl Write) -> CliResult<()> {
    match roster.search(roll_number)? {
        Some(student) => {
            writeln!(out, "Student found:")?;
            writeln!(out, "{}", student)?;
        }
        None => writeln!(out, "Student not found")?,
    }
    Ok(())
}

fn print_books(catalog: &Catalog, out: &mut impl Write) -> CliResult<()> {
    let books = catalog.list()?;
    if !books.is_empty() {
        writeln!(out, "Added books:")?;
        for book in books {
            writeln!(out, "{}", book)?;
        }
    }
    Ok(())
}

fn print_title_search(catalog: &Catalog, title: &str, out: &mut impl Write) -> CliResult<()> {
    let books = catalog.search_by_title(title)?;
    if books.is_empty() {
        writeln!(out, "No matching books found.")?;
    } else {
        writeln!(out, "Matching books found:")?;
        for book in books {
            writeln!(out, "{}", book)?;
        }
    }
    Ok(())
}

// =============================================================================
// Interactive Menus
// =============================================================================

/// Print `message`, read one line. `None` means stdin closed.
fn prompt(reader: &mut impl BufRead, out: &mut impl Write, message: &str) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Re-prompt until `parse` accepts the line. `None` means stdin closed.
fn prompt_until<T>(
    reader: &mut impl BufRead,
    out: &mut impl Write,
    message: &str,
    mut parse: impl FnMut(&str) -> CliResult<T>,
) -> CliResult<Option<T>> {
    loop {
        let Some(line) = prompt(reader, out, message)? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

fn student_menu(roster: &RosterService, reader: &mut impl BufRead, out: &mut impl Write) -> CliResult<()> {
    let key_range = roster.config().key_range();

    loop {
        writeln!(out, "\nMenu:")?;
        writeln!(out, "1. Add New Student")?;
        writeln!(out, "2. View All Students")?;
        writeln!(out, "3. Search Student by Roll Number")?;
        writeln!(out, "4. Update Student Grade")?;
        writeln!(out, "5. Exit")?;

        let Some(choice) = prompt(reader, out, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                let Some(name) = prompt_until(reader, out, "Enter student's name: ", |s| {
                    Ok(input::parse_name(s)?)
                })?
                else {
                    return Ok(());
                };

                let message = format!(
                    "Enter student's roll number ({}-{}): ",
                    key_range.start(),
                    key_range.end()
                );
                let Some(roll_number) = prompt_until(reader, out, &message, |s| {
                    let roll_number = input::parse_roll_number(s, &key_range)?;
                    if roster.search(roll_number)?.is_some() {
                        return Err("Roll number already exists. Please enter a unique roll number.".into());
                    }
                    Ok(roll_number)
                })?
                else {
                    return Ok(());
                };

                let Some(grade) = prompt_until(reader, out, "Enter student's grade: ", |s| {
                    Ok(input::parse_grade(s)?)
                })?
                else {
                    return Ok(());
                };

                match roster.add(&name, roll_number, grade) {
                    Ok(_) => writeln!(out, "Student added successfully!")?,
                    Err(e @ RollbookError::DuplicateKey(_)) => writeln!(out, "{}", e)?,
                    Err(e) => return Err(e.into()),
                }
            }
            "2" => print_students(roster, out)?,
            "3" => {
                let Some(roll_number) = prompt_until(
                    reader,
                    out,
                    "Enter roll number to search for the student: ",
                    |s| Ok(input::parse_lookup_key(s)?),
                )?
                else {
                    return Ok(());
                };
                print_search(roster, roll_number, out)?;
            }
            "4" => {
                let Some(roll_number) = prompt_until(
                    reader,
                    out,
                    "Enter roll number of the student to update grade: ",
                    |s| Ok(input::parse_lookup_key(s)?),
                )?
                else {
                    return Ok(());
                };
                let Some(grade) = prompt_until(reader, out, "Enter new grade: ", |s| {
                    Ok(input::parse_grade(s)?)
                })?
                else {
                    return Ok(());
                };

                match roster.update(roll_number, grade) {
                    Ok(student) => writeln!(out, "Grade updated: {}", student)?,
                    Err(RollbookError::NotFound(_)) => writeln!(out, "Student not found.")?,
                    Err(e) => return Err(e.into()),
                }
            }
            "5" => {
                writeln!(out, "Exiting the program. Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please enter a number between 1 and 5.")?,
        }
    }
}

/// Same rules as a student name, reworded for authors
fn parse_author(raw: &str) -> CliResult<String> {
    input::parse_name(raw).map_err(|e| match e {
        InputError::InvalidName(raw) => format!(
            "Invalid author {:?}. Author must contain only alphabets and spaces.",
            raw
        )
        .into(),
        other => other.into(),
    })
}

fn book_menu(catalog: &Catalog, reader: &mut impl BufRead, out: &mut impl Write) -> CliResult<()> {
    let max_year = catalog.config().max_publication_year;

    loop {
        writeln!(out, "\nMenu:")?;
        writeln!(out, "1. Add New Book")?;
        writeln!(out, "2. View All Books")?;
        writeln!(out, "3. Search Book by Title")?;
        writeln!(out, "4. Exit")?;

        let Some(choice) = prompt(reader, out, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                let Some(title) = prompt_until(reader, out, "Enter the title of the book: ", |s| {
                    Ok(input::parse_title(s)?)
                })?
                else {
                    return Ok(());
                };
                let Some(author) =
                    prompt_until(reader, out, "Enter the author of the book: ", parse_author)?
                else {
                    return Ok(());
                };
                let Some(year) = prompt_until(
                    reader,
                    out,
                    "Enter the publication year of the book: ",
                    |s| Ok(input::parse_publication_year(s, max_year)?),
                )?
                else {
                    return Ok(());
                };

                match catalog.find_exact(&title, &author)? {
                    Some(existing) => writeln!(out, "There is already such a book: {}", existing)?,
                    None => {
                        catalog.add(&title, &author, year)?;
                        writeln!(out, "Book added successfully!")?;
                    }
                }
            }
            "2" => print_books(catalog, out)?,
            "3" => {
                let Some(title) = prompt(reader, out, "Enter the title to search: ")? else {
                    return Ok(());
                };
                print_title_search(catalog, &title, out)?;
            }
            "4" => {
                writeln!(out, "Exiting the program. Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please enter a number between 1 and 4.")?,
        }
    }
}
