// Minimal blocking HTTP server for integration tests. Each connection
// carries one request; the request is recorded and answered with whatever
// the responder returns for it.

#![allow(dead_code)]

use reqwest::Url;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tour_images_cli::Config;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, as sent.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    fn url(&self) -> Url {
        Url::parse(&format!("http://mock{}", self.target)).expect("valid request target")
    }

    pub fn path(&self) -> String {
        self.url().path().to_string()
    }

    /// Decoded query pairs in the order they were sent.
    pub fn query(&self) -> Vec<(String, String)> {
        self.url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    /// Start serving on a random local port. `respond` gets the 0-based
    /// request number and the request, and returns (status, body).
    pub fn start<F>(respond: F) -> Self
    where
        F: Fn(usize, &RecordedRequest) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        thread::spawn(move || {
            for (n, stream) in listener.incoming().enumerate() {
                let Ok(stream) = stream else { continue };
                if let Err(e) = handle(stream, n, &respond, &log) {
                    eprintln!("mock server error: {}", e);
                }
            }
        });

        MockServer { addr, requests }
    }

    /// Always answer with the same status and body.
    pub fn fixed(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_, _| (status, body.clone()))
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> Config {
        config_for(&self.url())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log").clone()
    }
}

pub fn config_for(url: &str) -> Config {
    let mut config = Config::new(url, "test_instance", "test-token");
    config.timeout = Duration::from_secs(5);
    config.seed_delay = Duration::ZERO;
    config
}

/// A URL where nothing is listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

fn handle<F>(
    stream: TcpStream,
    n: usize,
    respond: &F,
    log: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()>
where
    F: Fn(usize, &RecordedRequest) -> (u16, String),
{
    let mut reader = BufReader::new(&stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            let (k, v) = (k.trim().to_string(), v.trim().to_string());
            if k.eq_ignore_ascii_case("content-length") {
                content_length = v.parse().unwrap_or(0);
            }
            headers.push((k, v));
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let request = RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    log.lock().expect("request log").push(request.clone());

    let (status, body) = respond(n, &request);
    let response = format!(
        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    drop(reader);
    let mut stream = stream;
    stream.write_all(response.as_bytes())?;
    stream.flush()
}
