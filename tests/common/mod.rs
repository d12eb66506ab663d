//! Shared helpers: stand-in macOS tools and a throwaway HTTP server.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use web2app::bundler::{Settings, SettingsBuilder, ToolPaths};

/// Writes an executable `/bin/sh` script.
#[cfg(unix)]
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Tools that succeed and append their arguments to `<dir>/<tool>.log`.
///
/// The fake `iconutil` lists the iconset into `iconutil.log` and writes
/// `icns-data` to the requested output file.
#[cfg(unix)]
pub fn recording_tools(dir: &Path) -> ToolPaths {
    ToolPaths {
        codesign: script(dir, "codesign", &log_line(dir, "codesign")),
        xattr: script(dir, "xattr", &log_line(dir, "xattr")),
        iconutil: script(
            dir,
            "iconutil",
            &format!(
                "ls \"$3\" > '{}'\nprintf 'icns-data' > \"$5\"",
                dir.join("iconutil.log").display()
            ),
        ),
    }
}

#[cfg(unix)]
fn log_line(dir: &Path, tool: &str) -> String {
    format!("echo \"$@\" >> '{}'", dir.join(format!("{tool}.log")).display())
}

/// Reads `<dir>/<tool>.log` as lines; empty if the tool never ran.
pub fn tool_log(dir: &Path, tool: &str) -> Vec<String> {
    std::fs::read_to_string(dir.join(format!("{tool}.log")))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// A scratch environment with data, tool and launcher locations.
pub struct Sandbox {
    pub root: tempfile::TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("tools")).unwrap();
        std::fs::create_dir_all(root.path().join("data")).unwrap();
        std::fs::write(root.path().join("WebAppLauncher"), b"#!/bin/sh\necho launcher\n").unwrap();
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.path().join("tools")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path().join("data")
    }

    pub fn launcher(&self) -> PathBuf {
        self.path().join("WebAppLauncher")
    }

    pub fn applications_dir(&self) -> PathBuf {
        self.path().join("Applications")
    }

    /// Settings pointing at this sandbox and the given tools.
    pub fn settings(&self, tools: ToolPaths) -> Settings {
        SettingsBuilder::new()
            .data_directory(self.data_dir())
            .launcher_binary(self.launcher())
            .applications_directory(self.applications_dir())
            .tools(tools)
            .tool_timeout(Duration::from_secs(10))
            .favicon_api(None)
            .build()
            .unwrap()
    }
}

/// A canned HTTP response.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response of `len` copies of `byte`.
    pub fn bytes(byte: u8, len: usize) -> Self {
        Self::ok(vec![byte; len])
    }
}

/// Serves `routes` (request target -> reply) on a local port until the
/// runtime shuts down. Unknown targets get 404.
pub async fn serve(routes: Vec<(&str, Reply)>) -> SocketAddr {
    let routes: Arc<HashMap<String, Reply>> = Arc::new(
        routes
            .into_iter()
            .map(|(target, reply)| (target.to_string(), reply))
            .collect(),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buffer = vec![0u8; 16 * 1024];
                let mut filled = 0;
                while filled < buffer.len() {
                    match socket.read(&mut buffer[filled..]).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => filled += n,
                    }
                    if buffer[..filled].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buffer[..filled]);
                let target = request.split_whitespace().nth(1).unwrap_or("/");
                let reply = routes
                    .get(target)
                    .cloned()
                    .unwrap_or_else(|| Reply::status(404, "not found"));

                let head = format!(
                    "HTTP/1.1 {} Test\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    reply.status,
                    reply.body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&reply.body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// A small valid PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([20, 120, 200, 255]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}
