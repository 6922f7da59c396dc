//! Throwaway HTTP/1.1 server for tests. One request per connection, canned
//! responses keyed by path (query string ignored).

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

pub struct TestServer {
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Request targets (path + query) in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

pub fn serve(routes: Vec<(&str, u16, String)>) -> TestServer {
    let routes: Vec<(String, u16, String)> = routes
        .into_iter()
        .map(|(path, status, body)| (path.to_string(), status, body))
        .collect();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let hits = Arc::new(Mutex::new(Vec::new()));

    let seen = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let target = read_target(&mut stream);
            seen.lock().unwrap().push(target.clone());

            let path = target.split('?').next().unwrap_or_default();
            let (status, body) = routes
                .iter()
                .find(|(route, _, _)| route == path)
                .map(|(_, status, body)| (*status, body.clone()))
                .unwrap_or((404, "not found".to_string()));

            let response = format!(
                "HTTP/1.1 {} X\r\n\
                 Content-Type: text/html; charset=utf-8\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    TestServer { base, hits }
}

fn read_target(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf);
    request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string()
}
