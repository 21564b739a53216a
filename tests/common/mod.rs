use std::io::Cursor;

use cronosquery::menu::LinePrompt;
use serde_json::Value;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock REST server plus the runtime used to drive wiremock's async API.
/// The client under test is blocking and must run outside the runtime.
pub struct Harness {
    pub server: MockServer,
    pub rt: Runtime,
}

#[allow(dead_code)]
impl Harness {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        Harness { server, rt }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn respond_json(&self, route: &str, body: Value) {
        self.mount(
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(body)),
        );
    }

    pub fn request_paths(&self) -> Vec<String> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }
}

pub type ScriptedPrompt = LinePrompt<Cursor<Vec<u8>>, Vec<u8>>;

#[allow(dead_code)]
pub fn scripted(lines: &[&str]) -> ScriptedPrompt {
    let mut input = lines.join("\n");
    input.push('\n');
    LinePrompt::new(Cursor::new(input.into_bytes()), Vec::new())
}

#[allow(dead_code)]
pub fn output(prompt: ScriptedPrompt) -> String {
    String::from_utf8(prompt.into_output()).expect("utf-8 output")
}
