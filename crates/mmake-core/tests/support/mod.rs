use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use mmake_core::resolver::{Content, ResolveError, Resolver};

/// Serves fixed bodies by URL; anything else is a 404.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new(bodies: &[(&str, &str)]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }
}

impl Resolver for StaticFetcher {
    fn get(&self, url: &str) -> Result<Content, ResolveError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.bodies.get(url) {
            Some(body) => Ok(Box::new(Cursor::new(body.clone()))),
            None => Err(ResolveError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        }
    }
}

#[allow(dead_code)]
pub fn read_to_string(mut content: Content) -> String {
    let mut out = String::new();
    std::io::Read::read_to_string(&mut content, &mut out).unwrap();
    out
}
