use clap::Parser;
use shellcore::Shell;

#[derive(Parser)]
#[command(name = "shellcore")]
#[command(about = "An interactive POSIX-flavored command shell core")]
#[command(version)]
struct Cli;

fn main() {
    Cli::parse();

    let shell = Shell::new();
    if let Err(e) = shell.load_rc_file() {
        eprintln!("Unable to open .shellrc: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = shell.run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
