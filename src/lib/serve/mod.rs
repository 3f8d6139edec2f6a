//! Local development server.
//!
//! Every request goes through the viewer-request transform and is then answered by a
//! static file origin, the way the function runs in front of a bucket origin at the edge.
use bytes::Bytes;
use http_body_util::Full;
use hyper::{
  body::Incoming,
  header::{HeaderValue, ALLOW, CONTENT_TYPE},
  service::service_fn,
  Method, Request, Response, StatusCode,
};
use hyper_util::{
  rt::{TokioExecutor, TokioIo},
  server::{conn::auto, graceful::GracefulShutdown},
};
use std::{
  convert::Infallible,
  future::Future,
  net::SocketAddr,
  path::PathBuf,
  sync::Arc,
  time::{Duration, Instant},
};
use tokio::net::TcpListener;

use crate::{
  log::DisplayDuration,
  serve_static::{self, DotFiles},
  transform::RequestTransformer,
};

pub type Body = Full<Bytes>;

#[allow(clippy::declare_interior_mutable_const)]
const TEXT_PLAIN: HeaderValue = HeaderValue::from_static("text/plain;charset=utf-8");
#[allow(clippy::declare_interior_mutable_const)]
const ALLOW_GET_HEAD: HeaderValue = HeaderValue::from_static("GET, HEAD");

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
  #[error("error binding to {addr}: {source}")]
  Bind {
    addr: SocketAddr,
    #[source]
    source: std::io::Error,
  },

  #[error("origin root {} is not a readable directory: {source}", path.display())]
  Root {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
  pub root: PathBuf,
  pub dot_files: DotFiles,
}

impl Origin {
  /// fails if root is not an existing directory
  pub async fn new(root: impl Into<PathBuf>, dot_files: DotFiles) -> Result<Self, ServeError> {
    let root = root.into();
    match tokio::fs::metadata(&root).await {
      Ok(meta) if meta.is_dir() => Ok(Self { root, dot_files }),
      Ok(_) => Err(ServeError::Root {
        path: root,
        source: std::io::Error::other("not a directory"),
      }),
      Err(source) => Err(ServeError::Root { path: root, source }),
    }
  }
}

#[derive(Debug)]
pub struct Handler {
  transformer: RequestTransformer,
  origin: Origin,
}

fn text(status: StatusCode, body: &'static str) -> Response<Body> {
  let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
  *response.status_mut() = status;
  response.headers_mut().insert(CONTENT_TYPE, TEXT_PLAIN);
  response
}

impl Handler {
  pub fn new(transformer: RequestTransformer, origin: Origin) -> Self {
    Self {
      transformer,
      origin,
    }
  }

  pub async fn handle<B>(&self, mut request: Request<B>) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().clone();
    let original_uri = request.uri().clone();

    let response = match self.transformer.transform_http(&mut request) {
      Ok(()) => self.origin(&method, request.uri().path().to_string()).await,
      Err(e) => {
        log::warn!("viewer-request transform failed for {original_uri}: {e}");
        text(StatusCode::BAD_REQUEST, "bad request")
      }
    };

    log::info!(
      "{method} {original_uri} => {} {} {}",
      request.uri(),
      response.status().as_u16(),
      DisplayDuration(start.elapsed())
    );

    response
  }

  async fn origin(&self, method: &Method, path: String) -> Response<Body> {
    let read_body = match *method {
      Method::GET => true,
      Method::HEAD => false,
      _ => {
        let mut response = text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
        response.headers_mut().insert(ALLOW, ALLOW_GET_HEAD);
        return response;
      }
    };

    let path = path.strip_prefix('/').unwrap_or(&path);

    match serve_static::resolve(&self.origin.root, path, self.origin.dot_files, read_body).await {
      Ok(file) => {
        log::debug!("serving {}", file.path.display());
        let mut response = Response::new(Full::new(file.body));
        *response.headers_mut() = file.headers;
        response
      }

      Err(e) => {
        let status = e.status();
        if status.is_server_error() {
          log::error!("error serving {path}: {e}");
        } else {
          log::debug!("not serving {path}: {e}");
        }
        text(status, status.canonical_reason().unwrap_or("error"))
      }
    }
  }
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
  TcpListener::bind(addr)
    .await
    .map_err(|source| ServeError::Bind { addr, source })
}

/// accept connections until `signal` resolves, then wait for the open ones
/// (or up to `graceful_shutdown_timeout` if set)
pub async fn serve<Sig>(
  listener: TcpListener,
  handler: Arc<Handler>,
  signal: Sig,
  graceful_shutdown_timeout: Option<Duration>,
) where
  Sig: Future<Output = ()>,
{
  tokio::pin!(signal);

  let server = auto::Builder::new(TokioExecutor::new());
  let graceful = GracefulShutdown::new();

  loop {
    tokio::select! {
      accept = listener.accept() => {
        let (stream, remote_addr) = match accept {
          Ok(accept) => accept,
          Err(e) => {
            log::error!("error accepting tcp stream - sleeping for 1 second: {e}");
            tokio::time::sleep(Duration::from_secs(1)).await;
            continue;
          }
        };

        let handler = handler.clone();
        let service = service_fn(move |request: Request<Incoming>| {
          let handler = handler.clone();
          async move { Ok::<_, Infallible>(handler.handle(request).await) }
        });

        let conn = server
          .serve_connection_with_upgrades(TokioIo::new(stream), service)
          .into_owned();
        let watched = graceful.watch(conn);

        tokio::spawn(async move {
          if let Err(e) = watched.await {
            log::warn!("error handling http connection from {remote_addr}: {e}");
          }
        });
      }

      _ = &mut signal => {
        break;
      }
    }
  }

  drop(listener);

  match graceful_shutdown_timeout {
    Some(timeout) => {
      if tokio::time::timeout(timeout, graceful.shutdown()).await.is_err() {
        log::info!(
          "graceful shutdown timeout ({}) reached",
          DisplayDuration(timeout)
        );
      }
    }
    None => graceful.shutdown().await,
  }
}
