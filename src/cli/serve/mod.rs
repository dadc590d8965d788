//! Development server.
//!
//! Request handling order:
//!
//! ```text
//! extra_public[0..n] → public/ → output/ → 404
//! ```

mod lifecycle;

use crate::{
    config::SiteConfig,
    core::is_shutdown,
    debug,
    host::{HandlerChain, HostPaths, StaticDir, response},
    log,
    public::PublicDirs,
};
use anyhow::Result;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Worker threads answering requests.
const WORKER_THREADS: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    chain: Arc<HandlerChain>,
    paths: HostPaths,
}

/// Build the host handler chain: extra public directories first, in
/// declaration order, then the native public directory and the output.
pub fn build_chain(dirs: &PublicDirs, paths: &HostPaths) -> HandlerChain {
    let mut chain = HandlerChain::new();
    chain.extend(dirs.handlers());
    chain.push(Box::new(StaticDir::new("public", &paths.public)));
    chain.push(Box::new(StaticDir::new("output", &paths.output)));
    chain
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &SiteConfig, dirs: &PublicDirs) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    let paths = dirs.paths().clone();
    let chain = build_chain(dirs, &paths);
    debug!("serve"; "handlers: {}", chain.names().join(" → "));

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        chain: Arc::new(chain),
        paths,
    })
}

impl BoundServer {
    /// Start the request loop (blocking).
    pub fn run(self) -> Result<()> {
        // Requests are answered on a small pool so a slow stream does not
        // hold up the accept loop
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(WORKER_THREADS)
            .build()?;

        for request in self.server.incoming_requests() {
            let chain = Arc::clone(&self.chain);
            let output = self.paths.output.clone();
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &chain, &output) {
                    log!("serve"; "request error: {e}");
                }
            });
        }
        Ok(())
    }
}

/// Start the dev server (blocking until Ctrl+C).
pub fn serve_site(config: &SiteConfig, dirs: &PublicDirs) -> Result<()> {
    bind_server(config, dirs)?.run()
}

/// Handle a single HTTP request
fn handle_request(request: Request, chain: &HandlerChain, output: &std::path::Path) -> Result<()> {
    // Early exit if shutdown requested
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    match chain.dispatch(request)? {
        Some(request) => response::respond_not_found(request, output),
        None => Ok(()),
    }
}
