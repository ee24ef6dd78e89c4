use arcmenu::events::Command;
use arcmenu::sys::server::socket_path;
use clap::Parser;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "arcmenuctl", version, about = "Control a running arcmenu overlay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(cli.command)
}

fn send_command(command: Command) -> anyhow::Result<()> {
    let path = socket_path();
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to arcmenu at {}: {}. Is arcmenu running?",
            path.display(),
            e
        )
    })?;

    log::debug!("Sending {command} to {}", path.display());
    writeln!(stream, "{}", command)?;
    Ok(())
}
