//! Shared test utilities for integration tests
//!
//! A scripted `GenerationService` stub, canned plan payloads, and a minimal
//! one-shot HTTP responder for exercising the real HTTP client.

use async_trait::async_trait;
use presence_planner::provider::{GenerationOutput, GenerationRequest, GenerationService};
use presence_planner::{BusinessInfo, ServiceError};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

/// One scripted reply of the stub service.
pub enum Reply {
    Text(String),
    Fail(ServiceError),
    /// Sleep, then reply with the text
    Delayed(Duration, String),
}

/// Stub service returning scripted replies in order.
pub struct StubService {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubService {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Stub that answers every call with the same text.
    pub fn repeating(text: String, times: usize) -> Self {
        Self::new((0..times).map(|_| Reply::Text(text.clone())).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationService for StubService {
    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GenerationOutput, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(GenerationOutput::text(text)),
            Some(Reply::Fail(error)) => Err(error),
            Some(Reply::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(GenerationOutput::text(text))
            }
            None => Err(ServiceError::EmptyResponse("stub script exhausted".to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

pub fn coffee_roasters() -> BusinessInfo {
    BusinessInfo::new(
        "Artisan Coffee Roasters",
        "Specialty Coffee & Cafe",
        "Young professionals, students, remote workers",
        "Increase online sales, build community",
    )
}

/// Well-formed plan payload with three platforms and twelve keywords.
pub fn coffee_plan_payload() -> Value {
    json!({
        "brandingVoice": "Warm, knowledgeable and a little playful, like a favourite barista.",
        "websiteStrategy": {
            "platformSuggestion": "Shopify",
            "keyFeatures": ["Online bean shop", "Subscription boxes", "Brew guide library", "Event calendar"],
            "designConcept": "Earthy minimalism with roast-colour accents"
        },
        "socialMediaPlan": [
            {
                "platform": "Instagram",
                "strategy": "Visual storytelling from bean to cup",
                "contentIdeas": ["Latte art reels", "Roast day stories", "Customer spotlights"]
            },
            {
                "platform": "TikTok",
                "strategy": "Short, playful brewing tutorials",
                "contentIdeas": ["60-second pour-over", "Coffee myths busted", "Study-session playlists"]
            },
            {
                "platform": "LinkedIn",
                "strategy": "Position the cafe as a remote-work hub",
                "contentIdeas": ["Co-working mornings", "Office coffee partnerships", "Founder notes"]
            }
        ],
        "contentMarketing": {
            "blogIdeas": ["A guide to single-origin beans", "How we source ethically", "Cold brew at home"],
            "videoIdeas": ["Roastery tour", "Cupping session walkthrough", "Barista tips for beginners"]
        },
        "seoKeywords": [
            "specialty coffee",
            "coffee roasters",
            "artisan coffee beans",
            "buy coffee beans online",
            "single origin coffee",
            "coffee subscription",
            "cafe for remote work",
            "best coffee near me",
            "fresh roasted coffee delivery",
            "ethically sourced coffee",
            "pour over coffee guide",
            "study friendly cafe"
        ]
    })
}

/// Request captured by the one-shot HTTP responder.
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

/// Serve exactly one HTTP exchange with the given status and body.
pub fn serve_once(status_line: &'static str, body: String) -> (SocketAddr, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let captured = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        captured
    });
    (addr, handle)
}

/// Accept connections and never answer. Dropping the listener ends the test server.
pub fn silent_listener() -> (SocketAddr, TcpListener) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    (addr, listener)
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "client closed before sending headers");
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buffer, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest {
        head,
        body: String::from_utf8_lossy(&buffer[header_end..]).to_string(),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
