use clap::Parser;
use lanes::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = lanes::tui::run(cli.data_dir.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
