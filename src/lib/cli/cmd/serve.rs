use anyhow::Context;
use std::sync::Arc;

use crate::{
  cli::{args, load_config},
  config::{
    defaults::{DEFAULT_LOG_LEVEL, DEFAULT_SERVE_DOT_FILES, DEFAULT_SERVE_LISTEN, DEFAULT_SERVE_ROOT},
    Config,
  },
  serve::{self, Handler, Origin},
  transform::RequestTransformer,
};

/// This function will create a [tokio] runtime and call [serve] within it.
pub fn runtime_serve(args: args::Serve) -> Result<(), anyhow::Error> {
  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()?;

  let r = runtime.block_on(serve(args));

  if let Err(e) = &r {
    if log::log_enabled!(log::Level::Error) {
      // {:#} format will print the anyhow::Error along with the chain of sources
      log::error!("{:#}", e);
    }
  }

  r
}

/// ### The edgefn serve command
/// Binds to the configured address and serves the static origin root, running the
/// viewer-request transform before every request, until the process receives Ctrl-C.
pub async fn serve(args: args::Serve) -> Result<(), anyhow::Error> {
  let config = load_config(args.config.as_deref())?;

  crate::log::init(crate::option!(
    args.log_level,
    config.log_level
    => DEFAULT_LOG_LEVEL
  ));

  let signal = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      log::error!("error listening for ctrl-c, the server will not stop on its own: {e}");
      std::future::pending::<()>().await;
    }
    log::info!("ctrl-c received, shutting down");
  };

  instance(args, config, signal).await
}

/// bind, build the handler and serve until `signal` resolves
pub async fn instance<Sig>(args: args::Serve, config: Config, signal: Sig) -> Result<(), anyhow::Error>
where
  Sig: std::future::Future<Output = ()>,
{
  let listen = crate::option!(args.listen, config.serve.listen => DEFAULT_SERVE_LISTEN);
  let root = crate::option!(
    args.root,
    config.serve.root.clone()
    => DEFAULT_SERVE_ROOT.to_string()
  );
  let dot_files = crate::option!(config.serve.dot_files => DEFAULT_SERVE_DOT_FILES);

  let origin = Origin::new(&root, dot_files).await?;
  let handler = Arc::new(Handler::new(
    RequestTransformer::new(&config.transform),
    origin,
  ));

  let listener = serve::bind(listen).await?;
  let local_addr = listener
    .local_addr()
    .context("error reading listener local address")?;

  log::info!("serving {root} on http://{local_addr}");

  serve::serve(
    listener,
    handler,
    signal,
    config.serve.graceful_shutdown_timeout(),
  )
  .await;

  log::info!("server stopped");

  Ok(())
}
