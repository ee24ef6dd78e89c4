use crate::events::{AppEvent, Command};
use async_channel::Sender;
use directories::BaseDirs;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

const SOCKET_NAME: &str = "arcmenu.sock";

/// `$XDG_RUNTIME_DIR/arcmenu.sock`, or the temp dir when there is no runtime dir.
pub fn socket_path() -> PathBuf {
    BaseDirs::new()
        .and_then(|dirs| dirs.runtime_dir().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(std::env::temp_dir)
        .join(SOCKET_NAME)
}

pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.parse() {
        Ok(command) => Some(command),
        Err(_) => {
            log::warn!("Unknown command: {:?}", line);
            None
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    let path = socket_path();
    if fs_err::metadata(&path).is_ok() {
        let _ = fs_err::remove_file(&path);
    }

    let listener = match UnixListener::bind(&path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        let Some(command) = parse_line(&line) else {
                            continue;
                        };
                        log::debug!("Received {command}");
                        if tx.send(command.into()).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
