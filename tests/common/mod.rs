use assert_fs::{fixture::ChildPath, prelude::*, TempDir};
use std::net::SocketAddr;
use svg2png::{Converter, ConverterOptions};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

pub const RED_SQUARE: &str =
    r#"<svg width="10" height="10"><rect width="10" height="10" fill="red"/></svg>"#;

pub struct Project {
    pub dir: TempDir,
    pub converter: Converter,
}

impl Project {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let converter = Converter::with_options(ConverterOptions {
            load_system_fonts: false,
            ..Default::default()
        })
        .unwrap();

        Self {
            dir: TempDir::new().unwrap(),
            converter,
        }
    }

    pub fn add_svg(&self, file_name: &str, contents: &str) -> ChildPath {
        let file = self.dir.child(file_name);
        file.write_str(contents).unwrap();
        file
    }

    pub fn output(&self, file_name: &str) -> ChildPath {
        self.dir.child(file_name)
    }
}

/// Serves `body` with `status` to every connection on a local port.
pub async fn serve(status: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };

            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.ends_with(b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: image/svg+xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    addr
}
