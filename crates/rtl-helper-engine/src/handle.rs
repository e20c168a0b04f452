//! Process-wide engine handle.
//!
//! One engine per document-load cycle lives in a thread-local slot: created
//! by the first [`initialize`] or [`reprocess_now`], reset (never rebuilt) by
//! later calls, and discarded by [`teardown`]. All document work happens on
//! the one thread that owns the document, so the slot needs no locking.

use std::cell::RefCell;
use std::time::Duration;

use rtl_helper_core::{Error, HelperConfig, Result};
use rtl_helper_dom::Document;

use crate::engine::{Engine, EngineId, ScanReport};
use crate::trigger::Retrigger;

thread_local! {
    static ENGINE: RefCell<Option<Engine>> = const { RefCell::new(None) };
}

/// Whether an engine exists on this thread.
pub fn is_initialized() -> bool {
    ENGINE.with(|slot| slot.borrow().is_some())
}

/// Identifier of the current engine.
pub fn current_id() -> Option<EngineId> {
    ENGINE.with(|slot| slot.borrow().as_ref().map(Engine::id))
}

/// Run `f` against the current engine, if any.
pub fn with_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
    ENGINE.with(|slot| slot.borrow_mut().as_mut().map(f))
}

/// Build a fresh engine with `factory`, attach it to `doc` and install it,
/// replacing any existing one.
pub fn install<F>(doc: &mut Document, factory: F) -> Result<ScanReport>
where
    F: FnOnce() -> Result<Engine>,
{
    let mut engine = factory()?;
    let report = engine.attach(doc)?;
    ENGINE.with(|slot| *slot.borrow_mut() = Some(engine));
    Ok(report)
}

/// Get-or-create: reset the existing engine, or install a new one.
pub fn get_or_create<F>(doc: &mut Document, factory: F) -> Result<ScanReport>
where
    F: FnOnce() -> Result<Engine>,
{
    match with_engine(|engine| engine.reprocess_all(doc)) {
        Some(report) => report,
        None => install(doc, factory),
    }
}

/// Manual reprocess: reset the engine, creating it if absent.
pub fn reprocess_now(doc: &mut Document, config: &HelperConfig) -> Result<ScanReport> {
    let report = get_or_create(doc, || Engine::new(config))?;
    tracing::info!("Reprocessing completed: {}", report);
    Ok(report)
}

/// Initialize with one delayed retry.
///
/// A failed get-or-create is logged and retried once after `retry_delay`
/// with a fresh engine from `factory`; a second failure is logged and
/// reported as [`Error::InitFailed`].
pub async fn initialize_with<F>(
    doc: &mut Document,
    retry_delay: Duration,
    mut factory: F,
) -> Result<ScanReport>
where
    F: FnMut() -> Result<Engine>,
{
    match get_or_create(doc, &mut factory) {
        Ok(report) => Ok(report),
        Err(e) => {
            tracing::error!("Failed to initialize RTL helper: {}", e);
            tokio::time::sleep(retry_delay).await;
            install(doc, &mut factory).map_err(|retry| {
                tracing::error!("Retry failed: {}", retry);
                Error::InitFailed(retry.to_string())
            })
        }
    }
}

/// Initialize from `config`, retrying once after the configured delay.
pub async fn initialize(doc: &mut Document, config: &HelperConfig) -> Result<ScanReport> {
    initialize_with(doc, config.timing.init_retry_delay(), || Engine::new(config)).await
}

/// Deliver pending mutation records to the current engine.
pub fn process_pending(doc: &mut Document) -> Option<ScanReport> {
    with_engine(|engine| engine.process_pending(doc))
}

/// Run a due re-trigger.
///
/// Resize and focus only act on an existing engine; navigation and manual
/// triggers create one if needed. Failures are logged, never propagated.
pub async fn fire(trigger: Retrigger, doc: &mut Document, config: &HelperConfig) -> Option<ScanReport> {
    tracing::debug!("Firing {} re-trigger", trigger);
    let result = match trigger {
        Retrigger::Resize => with_engine(|engine| engine.reprocess_all(doc))?,
        Retrigger::Focus => with_engine(|engine| engine.refresh_targets(doc))?,
        Retrigger::Navigation => initialize(doc, config).await,
        Retrigger::Manual => reprocess_now(doc, config),
    };
    match result {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::warn!("{} re-trigger failed: {}", trigger, e);
            None
        }
    }
}

/// Discard the engine and stop observing `doc`.
pub fn teardown(doc: &mut Document) -> bool {
    match ENGINE.with(|slot| slot.borrow_mut().take()) {
        Some(engine) => {
            engine.detach(doc);
            tracing::info!("Engine {} torn down", engine.id());
            true
        }
        None => false,
    }
}
