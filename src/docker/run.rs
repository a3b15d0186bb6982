use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;

use super::types::{CommandOutput, ContainerCommand};

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Run `program` with the command's arguments and wait for it to exit.
///
/// Both pipes are drained on their own threads. When `cmd.echo` is set each
/// line is forwarded to our own stdout/stderr as it arrives, so the runtime's
/// progress and diagnostics reach the operator unchanged.
pub fn exec(program: &str, cmd: &ContainerCommand) -> std::io::Result<CommandOutput> {
    let mut child = Command::new(program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().map(|s| drain(s, Stream::Stdout, cmd.echo));
    let stderr = child.stderr.take().map(|s| drain(s, Stream::Stderr, cmd.echo));

    let status = child.wait()?;

    Ok(CommandOutput {
        exit_code: status.code(),
        stdout: join(stdout),
        stderr: join(stderr),
    })
}

fn drain<R: Read + Send + 'static>(pipe: R, stream: Stream, echo: bool) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        let mut reader = BufReader::new(pipe);
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(_) => {
                    // Keep the pipe open until EOF so the child never sees SIGPIPE.
                    let _ = std::io::copy(&mut reader, &mut std::io::sink());
                    break;
                }
            }
            if echo {
                // Raw bytes; a closed terminal must not abort the runtime step.
                let _ = match stream {
                    Stream::Stdout => std::io::stdout().lock().write_all(&line),
                    Stream::Stderr => std::io::stderr().lock().write_all(&line),
                };
            }
            let text = String::from_utf8_lossy(&line);
            buf.push_str(text.trim_end_matches(['\r', '\n']));
            buf.push('\n');
        }
        buf
    })
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
