use anyhow::Result;
use board_engine::board::RenderStyle;
use board_engine::cli::CliHandler;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Two-player chess on the terminal", author, version)]
struct CmdArgs {
    /// Draw black pieces without ANSI colour codes
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cmd_args = CmdArgs::parse();
    let mut cli = CliHandler::new(RenderStyle {
        ansi_color: !cmd_args.no_color,
    });
    cli.run()
}
