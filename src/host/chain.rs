//! Dev-server handler chain.
//!
//! Handlers run in registration order. A handler either answers the request
//! or hands it back, and the next handler gets a turn.

use anyhow::Result;
use tiny_http::Request;

/// Result of offering a request to a handler.
pub enum Outcome {
    /// The handler responded; the chain stops.
    Handled,
    /// The handler declined; the request moves to the next handler.
    Next(Request),
}

/// A dev-server request handler.
pub trait Handler: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Respond to `request` or return it with [`Outcome::Next`].
    ///
    /// `Err` means the request was consumed and answering it failed.
    fn handle(&self, request: Request) -> Result<Outcome>;
}

/// Ordered list of handlers.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to the end of the chain.
    pub fn push(&mut self, handler: Box<dyn Handler>) {
        self.handlers.push(handler);
    }

    /// Append several handlers, keeping their order.
    pub fn extend(&mut self, handlers: impl IntoIterator<Item = Box<dyn Handler>>) {
        self.handlers.extend(handlers);
    }

    /// Handler names in order.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Run the chain. Returns the request if every handler declined.
    pub fn dispatch(&self, mut request: Request) -> Result<Option<Request>> {
        for handler in &self.handlers {
            match handler.handle(request)? {
                Outcome::Handled => return Ok(None),
                Outcome::Next(next) => request = next,
            }
        }
        Ok(Some(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tiny_http::TestRequest;

    struct Counting {
        name: &'static str,
        seen: Arc<AtomicUsize>,
    }

    impl Handler for Counting {
        fn name(&self) -> &str {
            self.name
        }

        fn handle(&self, request: Request) -> Result<Outcome> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::Next(request))
        }
    }

    struct Failing;

    impl Handler for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn handle(&self, _request: Request) -> Result<Outcome> {
            anyhow::bail!("boom")
        }
    }

    fn request(path: &str) -> Request {
        TestRequest::new().with_path(path).into()
    }

    #[test]
    fn test_all_defer_returns_request() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut chain = HandlerChain::new();
        chain.push(Box::new(Counting { name: "a", seen: Arc::clone(&seen) }));
        chain.push(Box::new(Counting { name: "b", seen: Arc::clone(&seen) }));

        let rest = chain.dispatch(request("/logo.svg")).unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(rest.unwrap().url(), "/logo.svg");
        assert_eq!(chain.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_error_stops_chain() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut chain = HandlerChain::new();
        chain.push(Box::new(Failing));
        chain.push(Box::new(Counting { name: "after", seen: Arc::clone(&seen) }));

        assert!(chain.dispatch(request("/a.css")).is_err());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_chain() {
        let chain = HandlerChain::new();
        assert!(chain.names().is_empty());
        assert!(chain.dispatch(request("/")).unwrap().is_some());
    }
}
