//! Minimal HTTP/1.1 server simulating a streaming site for integration tests.
//!
//! Serves a watch page embedding a playlist link, a search surface, the
//! playlist itself, and unit files (key/segments) under a generation-scoped
//! base path `/s/<gen>/`. A scripted stale response (410) bumps the
//! generation, so the next page fetch advertises a fresh base path —
//! exactly the signed-URL rotation the fetcher recovers from.

use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Default)]
pub struct StreamServerConfig {
    /// Item name the site knows about (used by the search surface).
    pub name: String,
    /// Playlist document served as `index.m3u8`.
    pub manifest: String,
    /// Unit files (key and segments) by filename.
    pub files: Vec<(&'static str, Vec<u8>)>,
    /// If true, the canonical `/watch/<name>` page returns 404.
    pub canonical_missing: bool,
    /// If true, the search surface links to a `/found/<name>-x1/` page.
    pub searchable: bool,
    /// Filenames that return 410 exactly once, then succeed after rotation.
    pub stale_once: Vec<&'static str>,
    /// Filenames that return 410 on every request.
    pub always_stale: Vec<&'static str>,
}

struct State {
    base: String,
    name_lower: String,
    manifest: String,
    files: HashMap<String, Vec<u8>>,
    stale_once: HashMap<String, u32>,
    always_stale: HashSet<String>,
    canonical_missing: bool,
    searchable: bool,
    generation: u32,
    log: Vec<(String, u32)>,
}

pub struct StreamServer {
    pub base: String,
    state: Arc<Mutex<State>>,
}

impl StreamServer {
    pub fn page_url_template(&self) -> String {
        format!("{}/watch/{{name}}", self.base)
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base)
    }

    /// All requests seen, as `(path, status)` in arrival order.
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.state.lock().unwrap().log.clone()
    }

    /// Unit fetches only (key/segment files under `/s/<gen>/`, excluding the
    /// playlist), as `(filename, status)` in arrival order.
    pub fn unit_requests(&self) -> Vec<(String, u32)> {
        self.requests()
            .into_iter()
            .filter_map(|(path, status)| {
                let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
                match parts.as_slice() {
                    ["s", _gen, file] if *file != "index.m3u8" => {
                        Some((file.to_string(), status))
                    }
                    _ => None,
                }
            })
            .collect()
    }
}

/// Starts the server in a background thread; it serves until the process
/// exits. The client under test is strictly sequential, so connections are
/// handled one at a time.
pub fn start(config: StreamServerConfig) -> StreamServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}", port);

    let state = Arc::new(Mutex::new(State {
        base: base.clone(),
        name_lower: config.name.to_lowercase(),
        manifest: config.manifest,
        files: config
            .files
            .into_iter()
            .map(|(name, bytes)| (name.to_string(), bytes))
            .collect(),
        stale_once: config
            .stale_once
            .into_iter()
            .map(|name| (name.to_string(), 1))
            .collect(),
        always_stale: config
            .always_stale
            .into_iter()
            .map(String::from)
            .collect(),
        canonical_missing: config.canonical_missing,
        searchable: config.searchable,
        generation: 1,
        log: Vec::new(),
    }));

    let handler_state = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream, &handler_state);
        }
    });

    StreamServer { base, state }
}

fn handle(mut stream: TcpStream, state: &Arc<Mutex<State>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match request.split_whitespace().nth(1) {
        Some(p) => p.split('?').next().unwrap_or(p).to_string(),
        None => return,
    };

    let (status, body) = route(&path, state);
    state.lock().unwrap().log.push((path, status));

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        410 => "Gone",
        _ => "Error",
    };
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
}

fn route(path: &str, state: &Arc<Mutex<State>>) -> (u32, Vec<u8>) {
    let mut st = state.lock().unwrap();

    if path.starts_with("/watch/") || path.starts_with("/found/") {
        if st.canonical_missing && path.starts_with("/watch/") {
            return (404, b"not here".to_vec());
        }
        let page = format!(
            "<html><video src=\"{}/s/{}/index.m3u8\"></video></html>",
            st.base, st.generation
        );
        return (200, page.into_bytes());
    }

    if path == "/search" {
        let body = if st.searchable {
            format!(
                "<html><a href=\"{}/found/{}-x1/\">result</a></html>",
                st.base, st.name_lower
            )
        } else {
            "<html>no results</html>".to_string()
        };
        return (200, body.into_bytes());
    }

    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    if let ["s", _gen, file] = parts.as_slice() {
        if *file == "index.m3u8" {
            return (200, st.manifest.clone().into_bytes());
        }
        if st.always_stale.contains(*file) {
            st.generation += 1;
            return (410, b"gone".to_vec());
        }
        if let Some(remaining) = st.stale_once.get_mut(*file) {
            if *remaining > 0 {
                *remaining -= 1;
                st.generation += 1;
                return (410, b"gone".to_vec());
            }
        }
        if let Some(bytes) = st.files.get(*file) {
            return (200, bytes.clone());
        }
    }

    (404, b"unknown".to_vec())
}
