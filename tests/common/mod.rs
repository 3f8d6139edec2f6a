#![allow(unused)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "serve-static")]
use edgefn::{
  config::Config,
  serve::{Handler, Origin},
  serve_static::DotFiles,
  transform::RequestTransformer,
};
use reqwest::redirect::Policy;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;

pub fn runtime() -> Runtime {
  Builder::new_multi_thread().enable_all().build().unwrap()
}

pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
  runtime().block_on(f)
}

pub fn client() -> reqwest::Client {
  reqwest::Client::builder()
    .redirect(Policy::none())
    .build()
    .unwrap()
}

pub async fn get(url: &str) -> Result<reqwest::Response, reqwest::Error> {
  client().get(url).send().await
}

/// bind a dev server on a random port and spawn it on the current runtime,
/// the handle resolves when `serve` returns
#[cfg(feature = "serve-static")]
pub async fn start<Sig>(
  root: &Dir,
  dot_files: DotFiles,
  config: &Config,
  signal: Sig,
) -> (SocketAddr, JoinHandle<()>)
where
  Sig: Future<Output = ()> + Send + 'static,
{
  let origin = Origin::new(root.as_str(), dot_files).await.unwrap();
  let handler = Arc::new(Handler::new(RequestTransformer::new(&config.transform), origin));
  let listener = edgefn::serve::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
  let addr = listener.local_addr().unwrap();

  let handle = tokio::spawn(edgefn::serve::serve(
    listener,
    handler,
    signal,
    config.serve.graceful_shutdown_timeout(),
  ));

  (addr, handle)
}

/// a running dev server, stopped when dropped
#[cfg(feature = "serve-static")]
pub struct Instance {
  pub addr: SocketAddr,
  abort: Option<tokio::sync::oneshot::Sender<()>>,
  handle: Option<JoinHandle<()>>,
  runtime: Option<Runtime>,
  _root: Dir,
}

#[cfg(feature = "serve-static")]
impl Instance {
  pub fn url(&self, path: &str) -> String {
    format!("http://{}{}", self.addr, path)
  }

  /// send the shutdown signal and wait for the server task to finish
  pub fn stop(&mut self) {
    if let Some(abort) = self.abort.take() {
      let _ = abort.send(());
    }
    if let (Some(runtime), Some(handle)) = (self.runtime.take(), self.handle.take()) {
      runtime
        .block_on(async { tokio::time::timeout(Duration::from_secs(5), handle).await })
        .expect("server did not stop after the shutdown signal")
        .unwrap();
    }
  }
}

#[cfg(feature = "serve-static")]
impl Drop for Instance {
  fn drop(&mut self) {
    if !std::thread::panicking() {
      self.stop();
    }
  }
}

#[cfg(feature = "serve-static")]
pub fn launch(root: Dir, dot_files: DotFiles, config: Config) -> Instance {
  let runtime = runtime();
  let (abort, abort_recv) = tokio::sync::oneshot::channel::<()>();

  let (addr, handle) = runtime.block_on(start(&root, dot_files, &config, async move {
    let _ = abort_recv.await;
  }));

  Instance {
    addr,
    abort: Some(abort),
    handle: Some(handle),
    runtime: Some(runtime),
    _root: root,
  }
}

#[macro_export]
macro_rules! assert_status {
  ($response:expr, $status:ident) => {
    assert_eq!($response.status(), reqwest::StatusCode::$status);
  };

  ($response:expr, $status:ident, $($tt:tt)*) => {
    assert_eq!($response.status(), reqwest::StatusCode::$status, $($tt)*);
  };
}

#[macro_export]
macro_rules! assert_header {
  ($response:expr, $header:expr, $value:expr) => {
    assert_eq!($response.headers().get($header).unwrap(), $value);
  };

  ($response:expr, $header:expr, $value:expr, $($tt:tt)*) => {
    assert_eq!($response.headers().get($header).unwrap(), $value, $($tt)*);
  };
}

#[macro_export]
macro_rules! assert_body {
  ($res:expr, $value:expr) => {
    let content = $res.text().await.unwrap();
    assert_eq!(content, $value);
  };

  ($res:expr, $value:expr, $($tt:tt)*) => {
    let content = $res.text().await.unwrap();
    assert_eq!(content, $value, $($tt)*);
  };
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dir(String);

impl Dir {
  pub fn file(&self, name: &str) -> String {
    format!("{}/{}", self.0, name)
  }

  pub fn write(&self, name: &str, contents: &str) {
    let path = self.file(name);
    if let Some(parent) = std::path::Path::new(&path).parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
  }
}

impl std::ops::Deref for Dir {
  type Target = String;
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Drop for Dir {
  fn drop(&mut self) {
    let _ = std::fs::remove_dir_all(&self.0);
  }
}

pub fn dir() -> Dir {
  let tmp = std::env::temp_dir();
  let rand: u64 = rand::random();
  let dir = tmp.join(format!("edgefn-test-{rand}"));
  std::fs::create_dir_all(&dir).unwrap();

  let path = dir.to_str().unwrap();

  #[cfg(not(windows))]
  {
    Dir(path.to_string())
  }

  #[cfg(windows)]
  {
    Dir(path.replace('\\', "/"))
  }
}

/// a site root with an index at `/`, a `docs` directory and a couple of assets
pub fn site() -> Dir {
  let dir = dir();
  dir.write("index.html", "home");
  dir.write("docs/index.html", "docs");
  dir.write("docs/default.htm", "docs default");
  dir.write("app.js", "console.log('app')");
  dir.write(".env", "SECRET=1");
  dir
}
