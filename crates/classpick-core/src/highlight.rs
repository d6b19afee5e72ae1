use crate::config::PickerConfig;
use crate::dom::{PickerPage, StyleProperty};

/// Inline style values captured before a highlight is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    pub outline: String,
    pub background_color: String,
    pub position: String,
    pub z_index: String,
}

impl StyleSnapshot {
    pub fn capture<P: PickerPage + ?Sized>(page: &P, node: &P::Node) -> Self {
        Self {
            outline: page.style(node, StyleProperty::Outline),
            background_color: page.style(node, StyleProperty::BackgroundColor),
            position: page.style(node, StyleProperty::Position),
            z_index: page.style(node, StyleProperty::ZIndex),
        }
    }

    pub fn get(&self, property: StyleProperty) -> &str {
        match property {
            StyleProperty::Outline => &self.outline,
            StyleProperty::BackgroundColor => &self.background_color,
            StyleProperty::Position => &self.position,
            StyleProperty::ZIndex => &self.z_index,
        }
    }

    pub fn restore<P: PickerPage + ?Sized>(&self, page: &mut P, node: &P::Node) {
        for property in StyleProperty::ALL {
            page.set_style(node, property, self.get(property));
        }
    }
}

/// The single highlight slot of a session.
///
/// Holds at most one element together with the styles it had before it was
/// highlighted. Every mutation is undone by [`Highlight::leave`] or
/// [`Highlight::clear`].
#[derive(Debug)]
pub struct Highlight<N> {
    slot: Option<(N, StyleSnapshot)>,
}

impl<N> Default for Highlight<N> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<N: Clone + PartialEq> Highlight<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&N> {
        self.slot.as_ref().map(|(node, _)| node)
    }

    pub fn snapshot(&self) -> Option<&StyleSnapshot> {
        self.slot.as_ref().map(|(_, snapshot)| snapshot)
    }

    /// Highlight `node`, restoring whatever was highlighted before.
    ///
    /// Returns `false` when `node` is already the highlighted element.
    pub fn enter<P>(&mut self, page: &mut P, node: &N, config: &PickerConfig) -> bool
    where
        P: PickerPage<Node = N> + ?Sized,
    {
        if self.current() == Some(node) {
            return false;
        }
        self.clear(page);

        let snapshot = StyleSnapshot::capture(page, node);
        page.set_style(
            node,
            StyleProperty::Outline,
            &format!("2px solid {}", config.accent_color),
        );
        page.set_style(
            node,
            StyleProperty::BackgroundColor,
            &config.highlight_background,
        );
        page.set_style(node, StyleProperty::Position, "relative");
        page.set_style(
            node,
            StyleProperty::ZIndex,
            &config.highlight_z_index.to_string(),
        );
        self.slot = Some((node.clone(), snapshot));
        true
    }

    /// Restore `node` if it is the highlighted element.
    pub fn leave<P>(&mut self, page: &mut P, node: &N) -> bool
    where
        P: PickerPage<Node = N> + ?Sized,
    {
        if self.current() != Some(node) {
            return false;
        }
        self.clear(page)
    }

    /// Restore the highlighted element, if any.
    pub fn clear<P>(&mut self, page: &mut P) -> bool
    where
        P: PickerPage<Node = N> + ?Sized,
    {
        match self.slot.take() {
            Some((node, snapshot)) => {
                snapshot.restore(page, &node);
                true
            }
            None => false,
        }
    }
}
