#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rhtlogger::api::RemoteClient;
use rhtlogger::config::{Endpoint, Endpoints};
use rhtlogger::models::draft::{DraftField, RegistrationDraft};
use std::env;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Command with an isolated config dir and no endpoint overrides leaking
/// in from the environment.
pub fn rht(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rhtlogger");
    cmd.env("RHTLOGGER_HOME", home);
    for ep in Endpoint::ALL {
        cmd.env_remove(ep.env_var());
    }
    cmd.env_remove("RHT_GPS_POSITION");
    cmd
}

/// Fresh, empty config dir inside the system temp dir
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhtlogger_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path.to_string_lossy().to_string()
}

/// Create a unique test store path inside the system temp dir and remove any existing file
pub fn setup_test_store(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhtlogger.sqlite", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Log in through the CLI so protected commands can run
pub fn login(home: &str, store: &str) {
    rht(home)
        .args(["--store", store, "login", "--email", "ana@example.com"])
        .assert()
        .success();
}

/// Draft that passes every wizard gate.
pub fn complete_draft() -> RegistrationDraft {
    let mut d = RegistrationDraft::default();
    let text = [
        (DraftField::Operator, "Ana Souza"),
        (DraftField::Matricula, "001"),
        (DraftField::Location, "Núcleo Rural Alexandre Gusmão"),
        (DraftField::RegionCode, "IV"),
        (DraftField::Community, "Brazlândia"),
        (DraftField::Process, "00070-00001234/2025-11"),
        (DraftField::Date, "2025-11-04"),
        (DraftField::StartTime, "07:30"),
        (DraftField::EndTime, "11:45"),
        (DraftField::Machine, "Trator MF 4292"),
        (DraftField::MachinePrefix, "TR-12"),
        (DraftField::Implement, "Grade aradora"),
        (DraftField::ImplementPrefix, "GA-03"),
        (DraftField::InitialHorimeter, "1200"),
        (DraftField::FinalHorimeter, "1206"),
        (DraftField::TotalService, "6.0"),
        (DraftField::Fuel, "40"),
        (DraftField::Notes, "Solo úmido na parte baixa"),
    ];
    for (field, value) in text {
        d.apply_edit(field, value).expect("apply field");
    }
    d.toggle_service("gradagem").expect("toggle service");
    d
}

// ---------------------------------------------------------------------------
// HTTP stub
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Serves the canned responses in order, one per connection, then stops.
pub struct StubServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: Option<JoinHandle<()>>,
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn read_request(stream: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = stream.read(&mut chunk).expect("read request");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut first = head.lines().next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let path = first.next().unwrap_or("").to_string();
    let length = head
        .lines()
        .find_map(|l| {
            let (k, v) = l.split_once(':')?;
            k.eq_ignore_ascii_case("content-length")
                .then(|| v.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    let mut body = buf[head_end.min(buf.len())..].to_vec();
    while body.len() < length {
        let n = stream.read(&mut chunk).expect("read body");
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Recorded {
        method,
        path,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

impl StubServer {
    pub fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let responses: Vec<(u16, String)> =
            responses.into_iter().map(|(s, b)| (s, b.to_string())).collect();

        let handle = thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let req = read_request(&mut stream);
                seen.lock().expect("lock").push(req);

                let reply = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = stream.write_all(reply.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            addr,
            requests,
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Requests received so far; waits for the serving thread to finish.
    pub fn finish(mut self) -> Vec<Recorded> {
        if let Some(h) = self.handle.take() {
            h.join().expect("stub thread");
        }
        self.requests.lock().expect("lock").clone()
    }

    pub fn received(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock").clone()
    }
}

/// Address nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/offline")
}

/// Accepts one connection and never answers.
pub fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(Duration::from_secs(5));
            drop(stream);
        }
    });
    format!("http://{addr}/slow")
}

pub fn client_with(pairs: &[(Endpoint, String)]) -> RemoteClient {
    client_with_timeout(pairs, Duration::from_secs(5))
}

pub fn client_with_timeout(pairs: &[(Endpoint, String)], timeout: Duration) -> RemoteClient {
    let mut endpoints = Endpoints::default();
    for (ep, url) in pairs {
        endpoints.set(*ep, Some(url.clone()));
    }
    RemoteClient::with_endpoints(endpoints, timeout).expect("client")
}
