use std::{
    ffi::OsString,
    io::Read,
    process::{Child, Command, Stdio},
    thread::JoinHandle,
    time::Duration,
};

use wait_timeout::ChildExt;

use crate::FfmpegError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FfmpegTool {
    Ffprobe,
    Ffmpeg,
}

impl FfmpegTool {
    fn command_name(self) -> &'static str {
        match self {
            Self::Ffprobe => "ffprobe",
            Self::Ffmpeg => "ffmpeg",
        }
    }
}

pub(crate) struct ToolOutput {
    pub stdout: Vec<u8>,
    #[allow(dead_code)]
    pub stderr: Vec<u8>,
}

/// Run an ffmpeg/ffprobe invocation to completion, capturing stdout and stderr.
///
/// Both pipes are drained on background threads so a chatty subprocess can
/// never deadlock against a full pipe buffer. If the process outlives
/// `timeout` it is killed and reaped.
pub(crate) fn run_tool(
    tool: FfmpegTool,
    args: &[OsString],
    timeout: Duration,
) -> Result<ToolOutput, FfmpegError> {
    let mut child = spawn_tool(tool, args)?;
    drop(child.stdin.take());

    let stdout_thread = reader_thread(child.stdout.take());
    let stderr_thread = reader_thread(child.stderr.take());

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            let _kill_error = child.kill();
            let _wait_error = child.wait();
            return Err(FfmpegError::Timeout(timeout.as_secs()));
        }
        Err(e) => {
            let _kill_error = child.kill();
            let _wait_error = child.wait();
            return Err(FfmpegError::Io(format!("{:?}", e.kind())));
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    if status.success() {
        Ok(ToolOutput { stdout, stderr })
    } else {
        Err(nonzero_exit_error(status.code(), &stderr))
    }
}

/// Check that both `ffmpeg` and `ffprobe` can be executed.
pub fn ffmpeg_and_ffprobe_are_callable() -> bool {
    let version_arg = [OsString::from("-version")];
    let timeout = Duration::from_secs(10);

    run_tool(FfmpegTool::Ffprobe, &version_arg, timeout).is_ok()
        && run_tool(FfmpegTool::Ffmpeg, &version_arg, timeout).is_ok()
}

fn spawn_tool(tool: FfmpegTool, args: &[OsString]) -> Result<Child, FfmpegError> {
    Command::new(tool.command_name())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            //the shell failed to execute the command. Separate out FileNotFound from all other
            //errors as by far the most likely cause is that ffmpeg is not installed.
            std::io::ErrorKind::NotFound => FfmpegError::FfmpegNotFound,
            kind => FfmpegError::Io(format!("{kind:?}")),
        })
}

fn reader_thread<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut acc = Vec::new();
        if let Some(mut pipe) = pipe {
            let _read_error = pipe.read_to_end(&mut acc);
        }
        acc
    })
}

fn nonzero_exit_error(exit_code: Option<i32>, stderr: &[u8]) -> FfmpegError {
    //sometimes ffmpeg creates very long error messages. Limit them to the first 500 characters
    match std::str::from_utf8(stderr) {
        Ok(error_text) => FfmpegError::FfmpegInternal {
            exit_code,
            stderr: error_text.chars().take(500).collect::<String>(),
        },
        Err(_) => FfmpegError::Utf8Conversion,
    }
}
