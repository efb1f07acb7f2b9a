//! `notegraph watch`: keep the graph current while notes are edited.
//!
//! ```text
//! notify thread ──► mpsc ──► Debouncer ──► invalidate() + rebuild ──► status line
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{EventKind, RecursiveMode, Watcher, event::ModifyKind};
use rustc_hash::FxHashSet;

use notegraph::logger::{status_error, status_success};
use notegraph::utils::plural_count;
use notegraph::{Config, ContentSource, FsSource, GraphBuilder, LinkIndex, debug, log};

const DEBOUNCE_MS: u64 = 300;

/// Collects changed paths until the burst settles.
struct Debouncer {
    extensions: Vec<String>,
    changes: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions.to_vec(),
            changes: FxHashSet::default(),
            last_event: None,
        }
    }

    /// Record an event. Returns whether it touched an indexed document.
    fn add_event(&mut self, event: &notify::Event) -> bool {
        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {}
            // Metadata-only changes (mtime/chmod) never change links
            EventKind::Modify(ModifyKind::Metadata(_)) => return false,
            EventKind::Modify(_) => {}
            _ => return false,
        }

        let documents: Vec<_> = event
            .paths
            .iter()
            .filter(|p| self.is_document(p))
            .cloned()
            .collect();
        let relevant = !documents.is_empty();
        for path in documents {
            debug!("watch"; "{:?} {}", event.kind, path.display());
            self.changes.insert(path);
        }
        if relevant {
            self.last_event = Some(Instant::now());
        }
        relevant
    }

    fn is_document(&self, path: &Path) -> bool {
        if is_temp_file(path) {
            return false;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_ready(&self) -> bool {
        self.last_event
            .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    /// Take the pending changes once the debounce window has passed.
    fn take_if_ready(&mut self) -> Option<Vec<PathBuf>> {
        if !self.is_ready() {
            return None;
        }
        self.last_event = None;
        let mut changes: Vec<_> = self.changes.drain().collect();
        changes.sort();
        (!changes.is_empty()).then_some(changes)
    }

    /// Time until the pending batch is ready.
    fn sleep_duration(&self) -> Duration {
        match self.last_event {
            Some(t) => Duration::from_millis(DEBOUNCE_MS).saturating_sub(t.elapsed()),
            None => Duration::from_secs(86400),
        }
    }
}

/// Editor swap and backup files.
fn is_temp_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return true;
    };
    name.starts_with(".#")
        || name.ends_with('~')
        || name.ends_with(".swp")
        || name.ends_with(".swx")
        || name.ends_with(".tmp")
}

pub async fn run(config: &Config) -> Result<()> {
    let source = FsSource::from_config(config);
    let dir = source.dir().to_path_buf();
    let index = LinkIndex::new(source, GraphBuilder::from_config(config));

    let (tx, mut rx) = tokio::sync::mpsc::channel::<notify::Event>(64);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            // Receiver gone means the watch loop ended
            Ok(event) => {
                let _ = tx.blocking_send(event);
            }
            Err(e) => log!("watch"; "notify error: {}", e),
        }
    })
    .context("failed to create file watcher")?;
    watcher
        .watch(&dir, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;

    log!("watch"; "watching {}", dir.display());
    rebuild(&index, None).await;

    let mut debouncer = Debouncer::new(&config.content.extensions);
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => {
                    if debouncer.add_event(&event) {
                        index.invalidate();
                    }
                }
                None => break,
            },
            _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                if let Some(changes) = debouncer.take_if_ready() {
                    rebuild(&index, Some(changes.as_slice())).await;
                }
            }
        }
    }
    Ok(())
}

/// Rebuild the graph and replace the status line with the outcome.
async fn rebuild<S: ContentSource>(index: &LinkIndex<S>, changes: Option<&[PathBuf]>) {
    let started = Instant::now();
    let trigger = match changes {
        Some(changes) => format!(" ({} changed)", plural_count(changes.len(), "file")),
        None => String::new(),
    };

    match index.graph().await {
        Ok(graph) => status_success(&format!(
            "graph ready: {}, {} in {:?}{}",
            plural_count(graph.len(), "document"),
            plural_count(graph.edge_count(), "link"),
            started.elapsed(),
            trigger
        )),
        Err(e) => status_error(&format!("graph build failed{trigger}"), &e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};

    fn event(kind: EventKind, path: &str) -> notify::Event {
        notify::Event::new(kind).add_path(PathBuf::from(path))
    }

    fn debouncer() -> Debouncer {
        Debouncer::new(&["md".to_string(), "mdx".to_string()])
    }

    #[test]
    fn test_document_events_recorded() {
        let mut d = debouncer();
        assert!(d.add_event(&event(EventKind::Create(CreateKind::File), "/c/a.md")));
        assert!(d.add_event(&event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "/c/b.MDX"
        )));
        assert!(d.add_event(&event(EventKind::Remove(RemoveKind::File), "/c/a.md")));
        assert_eq!(d.changes.len(), 2);
    }

    #[test]
    fn test_ignored_events() {
        let mut d = debouncer();
        assert!(!d.add_event(&event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime)),
            "/c/a.md"
        )));
        assert!(!d.add_event(&event(EventKind::Create(CreateKind::File), "/c/image.png")));
        assert!(!d.add_event(&event(EventKind::Create(CreateKind::File), "/c/.a.md.swp")));
        assert!(!d.add_event(&event(EventKind::Create(CreateKind::File), "/c/a.md~")));
        assert!(d.changes.is_empty());
        assert!(d.take_if_ready().is_none());
    }

    #[test]
    fn test_waits_for_debounce_window() {
        let mut d = debouncer();
        d.add_event(&event(EventKind::Create(CreateKind::File), "/c/a.md"));
        assert!(d.take_if_ready().is_none());
        assert!(d.sleep_duration() <= Duration::from_millis(DEBOUNCE_MS));

        d.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 1));
        assert_eq!(d.take_if_ready().unwrap(), [PathBuf::from("/c/a.md")]);
        assert!(d.take_if_ready().is_none());
    }
}
