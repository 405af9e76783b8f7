use std::{
    io::{self, BufRead, BufReader, Read, Write},
    net::{SocketAddr, TcpListener, TcpStream},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration, SystemTime},
};

use anyhow::Context;
use serde_json::json;

use crate::{
    checkout::order::{OrderGateway, OrderRequest},
    config::ProductConfig,
    foundation::error::{ZenithError, ZenithResult},
};

pub const ORDERS_ROUTE: &str = "/api/orders";
pub const FALLBACK_ERROR: &str = "Failed to create order";

const MAX_HEAD_BYTES: usize = 16 * 1024;
const READ_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_WAIT: Duration = Duration::from_millis(10);

/// JSON response produced by [`OrderService`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` for bodiless responses (204).
    pub body: Option<serde_json::Value>,
}

impl ApiResponse {
    fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            204 => "No Content",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }

    pub fn to_http(&self) -> Vec<u8> {
        let body = self
            .body
            .as_ref()
            .map(|b| b.to_string())
            .unwrap_or_default();
        let mut out = format!("HTTP/1.1 {} {}\r\n", self.status, self.reason());
        if self.body.is_some() {
            out.push_str("Content-Type: application/json\r\n");
        }
        if self.status == 204 {
            out.push_str("Allow: POST, OPTIONS\r\n");
        }
        out.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ));
        out.into_bytes()
    }
}

/// Mints gateway orders for the configured product.
pub struct OrderService<G> {
    gateway: G,
    product: ProductConfig,
}

impl<G: OrderGateway> OrderService<G> {
    pub fn new(gateway: G, product: ProductConfig) -> Self {
        Self { gateway, product }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn product(&self) -> &ProductConfig {
        &self.product
    }

    /// One gateway call per invocation; no retry and no shared state between calls.
    #[tracing::instrument(skip(self))]
    pub fn create_order(&self) -> ApiResponse {
        let request = OrderRequest::for_product(&self.product, SystemTime::now());
        match self.gateway.create_order(&request) {
            Ok(order) => {
                tracing::info!(order_id = %order.id, receipt = %request.receipt, "order created");
                ApiResponse::json(
                    200,
                    json!({ "id": order.id, "amount": order.amount, "currency": order.currency }),
                )
            }
            Err(err) => {
                tracing::error!(error = %err, receipt = %request.receipt, "gateway error");
                let message = err.to_string();
                let message = if message.trim().is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                };
                ApiResponse::json(500, json!({ "error": message }))
            }
        }
    }

    /// Route a request line.
    pub fn handle(&self, method: &str, target: &str) -> ApiResponse {
        let path = target.split_once('?').map_or(target, |(p, _)| p);
        if path.trim_end_matches('/') != ORDERS_ROUTE {
            return ApiResponse::json(404, json!({ "error": "Not Found" }));
        }
        if method.eq_ignore_ascii_case("POST") {
            self.create_order()
        } else if method.eq_ignore_ascii_case("OPTIONS") {
            ApiResponse::empty(204)
        } else {
            ApiResponse::json(405, json!({ "error": "Method Not Allowed" }))
        }
    }
}

/// Blocking HTTP/1.1 listener for the order route, one thread per connection.
pub struct OrderServer {
    listener: TcpListener,
    stop: Arc<AtomicBool>,
}

impl OrderServer {
    pub fn bind(addr: &str) -> ZenithResult<Self> {
        let listener =
            TcpListener::bind(addr).with_context(|| format!("bind order server on {addr}"))?;
        listener
            .set_nonblocking(true)
            .context("set order listener non-blocking")?;
        Ok(Self {
            listener,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn local_addr(&self) -> ZenithResult<SocketAddr> {
        Ok(self.listener.local_addr().context("order server local addr")?)
    }

    /// Set to `true` to make [`OrderServer::serve`] return after its current poll.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn serve<G>(self, service: Arc<OrderService<G>>) -> ZenithResult<()>
    where
        G: OrderGateway + 'static,
    {
        let addr = self.local_addr()?;
        tracing::info!(%addr, route = ORDERS_ROUTE, "order server listening");
        while !self.stop.load(Ordering::Relaxed) {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    let service = Arc::clone(&service);
                    thread::spawn(move || {
                        if let Err(err) = handle_connection(stream, &service) {
                            tracing::warn!(%peer, error = %err, "connection failed");
                        }
                    });
                }
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => thread::sleep(POLL_WAIT),
                Err(err) => {
                    return Err(ZenithError::Other(
                        anyhow::Error::new(err).context("accept order connection"),
                    ));
                }
            }
        }
        tracing::info!(%addr, "order server stopped");
        Ok(())
    }

    pub fn spawn<G>(self, service: Arc<OrderService<G>>) -> JoinHandle<ZenithResult<()>>
    where
        G: OrderGateway + 'static,
    {
        thread::spawn(move || self.serve(service))
    }
}

fn handle_connection<G: OrderGateway>(stream: TcpStream, service: &OrderService<G>) -> io::Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(READ_TIMEOUT))?;
    let mut reader = BufReader::new(stream.try_clone()?);

    let response = match read_request_head(&mut reader)? {
        Some(head) => {
            drain_body(&mut reader, head.content_length)?;
            tracing::debug!(method = %head.method, target = %head.target, "request");
            service.handle(&head.method, &head.target)
        }
        None => ApiResponse::json(400, json!({ "error": "Bad Request" })),
    };

    let mut stream = stream;
    stream.write_all(&response.to_http())?;
    stream.flush()
}

struct RequestHead {
    method: String,
    target: String,
    content_length: usize,
}

fn read_request_head<R: BufRead>(reader: &mut R) -> io::Result<Option<RequestHead>> {
    let mut head = reader.by_ref().take(MAX_HEAD_BYTES as u64);
    let mut request_line = String::new();
    if !read_head_line(&mut head, &mut request_line)? {
        return Ok(None);
    }
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Ok(None);
    };
    let (method, target) = (method.to_string(), target.to_string());

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if !read_head_line(&mut head, &mut line)? {
            return Ok(None);
        }
        if line == "\r\n" || line == "\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.trim().eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    Ok(Some(RequestHead {
        method,
        target,
        content_length,
    }))
}

/// `false` when the stream ends or the head budget runs out before a line terminator.
fn read_head_line<R: BufRead>(head: &mut io::Take<R>, line: &mut String) -> io::Result<bool> {
    head.read_line(line)?;
    Ok(line.ends_with('\n'))
}

fn drain_body<R: Read>(reader: &mut R, len: usize) -> io::Result<()> {
    io::copy(&mut reader.take(len as u64), &mut io::sink())?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/checkout/server.rs"]
mod tests;
