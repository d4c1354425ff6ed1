//! Live JSON preview of form state

use crate::error::FormError;
use crate::model::FormState;
use crate::observer::SubscriptionId;
use crate::path::FieldPath;
use crate::store::FormStore;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};
use std::sync::Arc;

/// Render the snapshot as JSON
///
/// `indent` spaces per nesting level, one key per line;
/// `0` yields compact output.
///
/// # Errors
/// Returns error if serialization fails
pub fn render_preview(state: &FormState, indent: usize) -> Result<String, FormError> {
    let mut buf = Vec::new();
    if indent == 0 {
        let mut ser = Serializer::with_formatter(&mut buf, CompactFormatter);
        state.serialize(&mut ser)?;
    } else {
        let spaces = " ".repeat(indent);
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(spaces.as_bytes()));
        state.serialize(&mut ser)?;
    }
    String::from_utf8(buf).map_err(|e| FormError::Preview(e.to_string()))
}

#[derive(Debug, Default)]
struct PreviewBuffer {
    text: String,
    renders: u64,
}

/// Preview text kept current by a root subscription
///
/// Cloning shares the same buffer. The subscription stays on the store
/// until [`LivePreview::detach`] is called.
#[derive(Debug, Clone)]
pub struct LivePreview {
    buffer: Arc<Mutex<PreviewBuffer>>,
    subscription: SubscriptionId,
}

impl LivePreview {
    /// Render the store now and re-render after every mutation
    ///
    /// # Errors
    /// Returns error if the initial render fails
    pub fn attach(store: &mut FormStore) -> Result<Self, FormError> {
        let indent = store.config().preview.indent;
        let buffer = Arc::new(Mutex::new(PreviewBuffer {
            text: render_preview(store.state(), indent)?,
            renders: 1,
        }));

        let shared = Arc::clone(&buffer);
        let subscription = store.subscribe_path(
            FieldPath::root(),
            Box::new(move |change, state| match render_preview(state, indent) {
                Ok(text) => {
                    let mut buf = shared.lock();
                    buf.text = text;
                    buf.renders += 1;
                }
                Err(e) => {
                    tracing::warn!(revision = change.revision, error = %e, "preview render failed");
                }
            }),
        );

        Ok(Self {
            buffer,
            subscription,
        })
    }

    /// Stop re-rendering; the last text stays readable from clones
    ///
    /// Returns `false` if the subscription was already gone.
    pub fn detach(self, store: &mut FormStore) -> bool {
        store.unsubscribe(self.subscription)
    }

    /// Subscription keeping this preview current
    #[inline]
    #[must_use]
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Current preview text
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.lock().text.clone()
    }

    /// Number of renders so far, including the initial one
    #[must_use]
    pub fn renders(&self) -> u64 {
        self.buffer.lock().renders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_two_space_layout() {
        let text = render_preview(&FormState::default(), 2).unwrap();
        assert_eq!(
            text,
            "{\n  \"name\": \"\",\n  \"email\": \"\",\n  \"likesTypescript\": \"YES\",\n  \"skills\": [],\n  \"friends\": []\n}"
        );
    }

    #[test]
    fn render_compact() {
        let text = render_preview(&FormState::default(), 0).unwrap();
        assert!(!text.contains('\n'));
    }

    #[test]
    fn attach_tracks_mutations() {
        let mut store = FormStore::new();
        let preview = LivePreview::attach(&mut store).unwrap();
        assert_eq!(preview.renders(), 1);

        store.set_field("name", "Ada").unwrap();
        assert_eq!(preview.renders(), 2);
        assert!(preview.text().contains("\"name\": \"Ada\""));

        // no-op writes do not re-render
        store.set_field("name", "Ada").unwrap();
        assert_eq!(preview.renders(), 2);
    }

    #[test]
    fn detached_preview_stops_rendering() {
        let mut store = FormStore::new();
        let preview = LivePreview::attach(&mut store).unwrap();
        let reader = preview.clone();
        assert_eq!(store.observer_count(), 1);

        assert!(preview.detach(&mut store));
        assert_eq!(store.observer_count(), 0);

        store.set_field("name", "x").unwrap();
        store.append_default_friend();
        assert_eq!(reader.renders(), 1);
        assert!(reader.text().contains("\"name\": \"\""));
    }

    #[test]
    fn detach_twice_reports_missing_subscription() {
        let mut store = FormStore::new();
        let preview = LivePreview::attach(&mut store).unwrap();
        let copy = preview.clone();
        assert!(preview.detach(&mut store));
        assert!(!copy.detach(&mut store));
    }
}
