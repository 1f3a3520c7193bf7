//! spark-grid - edit the records behind an HTTP endpoint in the terminal.
//!
//! Configuration comes from the environment (and `.env`), see
//! [`GridConfig`](spark_grid::GridConfig). Logs go to a file because the
//! terminal is taken by the grid.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::terminal;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{error, info};

use spark_grid::state::keyboard::poll_event;
use spark_grid::{
    logging, render_grid, user_columns, DiffRenderer, FetchError, Grid, GridConfig,
    HttpRecordSource, InputEvent, KeyOutcome, Record, RecordSource, TerminalGuard,
};

type LoadResult = Result<Vec<Record>, FetchError>;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = GridConfig::from_env().context("invalid configuration")?;
    let _guard = logging::init(&config).context("failed to set up logging")?;
    info!(
        endpoint = %config.endpoint,
        page_size = config.grid.page_size,
        delete_mode = ?config.grid.delete_mode,
        "starting spark-grid"
    );

    // Signals stay on this thread; only the fetch result crosses over.
    let (tx, rx) = oneshot::channel::<LoadResult>();
    let source = HttpRecordSource::new(config.endpoint.clone());
    tokio::spawn(async move {
        let _ = tx.send(source.fetch_all().await);
    });

    let grid = Grid::new(user_columns(), config.grid);
    let screen = TerminalGuard::enter(io::stdout()).context("failed to set up the terminal")?;
    let mut renderer = DiffRenderer::new(io::stdout());

    let result = run(&grid, &mut renderer, rx);
    drop(screen);

    if let Err(err) = &result {
        error!(error = %err, "grid exited with error");
    }
    info!("bye");
    result
}

fn run(
    grid: &Grid,
    renderer: &mut DiffRenderer<Stdout>,
    rx: oneshot::Receiver<LoadResult>,
) -> Result<()> {
    let (mut width, mut height) = terminal::size()?;
    let mut pending = Some(rx);
    let mut dirty = true;

    loop {
        if let Some(rx) = pending.as_mut() {
            match rx.try_recv() {
                Ok(result) => {
                    // Failure is recorded in the store's load state.
                    let _ = grid.store().apply_load(result);
                    pending = None;
                    dirty = true;
                }
                Err(TryRecvError::Closed) => {
                    error!("record fetch task ended without a result");
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        if dirty {
            renderer.render(&render_grid(grid, width, height))?;
            dirty = false;
        }

        match poll_event(POLL_INTERVAL)? {
            Some(InputEvent::Key(event)) => match grid.handle_key(&event) {
                KeyOutcome::Quit => return Ok(()),
                KeyOutcome::Handled => dirty = true,
                KeyOutcome::Ignored => {}
            },
            Some(InputEvent::Resize(w, h)) => {
                width = w;
                height = h;
                renderer.invalidate();
                dirty = true;
            }
            Some(InputEvent::None) | None => {}
        }
    }
}
