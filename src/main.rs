use clap::Parser;
use compiler::Compiler;
use parser::Parser as ASTParser;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use thiserror::Error;
use tokenizer::Tokenizer;

/// Exit status when no input file is given
const EXIT_NO_INPUT: i32 = 1;
/// Exit status when the input file cannot be opened
const EXIT_UNREADABLE_INPUT: i32 = 2;

#[derive(Error, Debug)]
enum ExprlangError {
    #[error(transparent)]
    Tokenizer(#[from] tokenizer::Error),

    #[error(transparent)]
    Parser(#[from] parser::Error),

    #[error(transparent)]
    Compile(#[from] compiler::CompileError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The source file to compile
    input_file: Option<PathBuf>,
    /// The output file for the generated assembly. If not set, output will go to stdout.
    #[arg(short, long)]
    output_file: Option<PathBuf>,
    /// Print the parsed expression tree to stderr before emitting assembly
    #[arg(short, long)]
    verbose: bool,
}

fn run_logic(args: Args, tokenizer: Tokenizer) -> Result<(), ExprlangError> {
    let mut parser = ASTParser::new(tokenizer);

    let tree = match parser.parse_all()? {
        Some(tree) => tree,
        None => return Ok(()),
    };

    if args.verbose {
        eprint!("{}", parser::display::render(&tree));
    }

    let assembly = Compiler::new(None).compile(&tree)?;

    let mut writer: BufWriter<Box<dyn Write>> = match args.output_file {
        Some(output_file) => BufWriter::new(Box::new(File::create(output_file)?)),
        None => BufWriter::new(Box::new(std::io::stdout())),
    };

    assembly.write(&mut writer)?;

    Ok(())
}

fn main() {
    let args = Args::parse();

    let input_file = match args.input_file {
        Some(ref input_file) => input_file,
        None => {
            eprintln!("error: no input file given");
            std::process::exit(EXIT_NO_INPUT);
        }
    };

    let tokenizer = match Tokenizer::from_path(input_file) {
        Ok(tokenizer) => tokenizer,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", input_file.display(), e);
            std::process::exit(EXIT_UNREADABLE_INPUT);
        }
    };

    if let Err(e) = run_logic(args, tokenizer) {
        eprintln!("Compilation error:\n{}", e);
        std::process::exit(1);
    }
}
