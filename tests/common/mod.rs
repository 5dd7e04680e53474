//! Shared fixtures for integration tests: an in-process HTTP server serving
//! a package index plus archives, and a zip builder for package fixtures.

#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

/// One servable route: URL path, HTTP status, response body
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(path: &'static str, body: Vec<u8>) -> Self {
        Self {
            path,
            status: 200,
            body,
        }
    }

    pub fn not_found(path: &'static str) -> Self {
        Self {
            path,
            status: 404,
            body: b"not found".to_vec(),
        }
    }
}

/// Local HTTP server that answers the configured routes until the test
/// process exits
pub struct FixtureServer {
    base_url: String,
}

impl FixtureServer {
    /// Spawn a server; `routes_for` receives the server's base URL so the
    /// index document can reference download URLs on the same server.
    pub fn spawn(routes_for: impl FnOnce(&str) -> Vec<Route>) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let base_url = format!("http://{addr}");
        let routes = routes_for(&base_url);

        std::thread::spawn(move || {
            while let Ok(request) = server.recv() {
                let url = request.url().to_string();
                let response = match routes.iter().find(|r| url == r.path) {
                    Some(route) => tiny_http::Response::from_data(route.body.clone())
                        .with_status_code(route.status),
                    None => tiny_http::Response::from_data(b"not found".to_vec())
                        .with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self { base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Build a zip archive in memory with all entries under `root/`
pub fn package_zip(root: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default();
        zip.add_directory(root, options).unwrap();
        for (name, contents) in files {
            zip.start_file(format!("{root}/{name}"), options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    cursor.into_inner()
}

/// Build an index document with the given plugin entries
/// (slug, version, download URL)
pub fn plugins_index(entries: &[(&str, &str, &str)]) -> Vec<u8> {
    let plugins: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(slug, version, download)| {
            (
                (*slug).to_string(),
                serde_json::json!({
                    "name": slug,
                    "version": version,
                    "slug": slug,
                    "download": download,
                    "install_path": format!("user/plugins/{slug}"),
                }),
            )
        })
        .collect();

    serde_json::to_vec(&serde_json::json!({ "plugins": plugins, "themes": {} })).unwrap()
}
