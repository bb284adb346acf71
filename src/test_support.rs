// Loopback HTTP server for exercising the client over a real socket.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub api_key: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl CannedResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    /// Hold the response back, to simulate a slow server.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Serves the canned responses in order, then answers 404. Records every
/// request it sees. The listener thread is unblocked and joined on drop.
pub struct TestServer {
    server: Arc<tiny_http::Server>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
    port: u16,
}

impl TestServer {
    pub fn start(responses: Vec<CannedResponse>) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind test server"));
        let port = server
            .server_addr()
            .to_ip()
            .expect("test server listens on TCP")
            .port();
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = server.clone();
            let requests = requests.clone();
            thread::spawn(move || {
                let mut responses = responses.into_iter();
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    request.as_reader().read_to_string(&mut body).ok();

                    let api_key = request
                        .headers()
                        .iter()
                        .find(|header| header.field.equiv("api_key"))
                        .map(|header| header.value.as_str().to_string());

                    requests.lock().unwrap().push(RecordedRequest {
                        method: request.method().to_string().to_uppercase(),
                        path: request.url().to_string(),
                        api_key,
                        body,
                    });

                    let canned = responses
                        .next()
                        .unwrap_or_else(|| CannedResponse::new(404, ""));
                    if let Some(delay) = canned.delay {
                        thread::sleep(delay);
                    }
                    let response = tiny_http::Response::from_string(canned.body)
                        .with_status_code(canned.status);
                    request.respond(response).ok();
                }
            })
        };

        Self {
            server,
            requests,
            handle: Some(handle),
            port,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}
