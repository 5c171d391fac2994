// src/engine/injector.rs

use tracing::warn;

use crate::model::ad::{Ad, PlacementSlot};

/// Imperative mount/unmount adapter over whatever the target platform uses
/// as its ad container. The engine never touches the platform directly.
pub trait MarkupHost {
    /// Inserts a markup fragment at the container's insertion point.
    /// Embedded scripts run as part of mounting; the markup is operator
    /// supplied and trusted.
    fn mount(&mut self, markup: &str) -> Result<(), String>;

    /// Removes everything previously mounted into the container.
    fn clear(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MountKey {
    ad_id: String,
    slot: PlacementSlot,
}

/// Mounts `code`-kind ads into a host container.
///
/// Keyed by ad id + slot: re-applying the same resolved ad is a no-op, so
/// re-renders never execute the same scripts twice. The previous content is
/// always cleared before new markup is mounted, and a mount failure leaves
/// the container empty rather than crashing the page.
#[derive(Debug, Default)]
pub struct CodeInjector {
    mounted: Option<MountKey>,
}

impl CodeInjector {
    pub fn new() -> Self {
        Self { mounted: None }
    }

    pub fn apply(&mut self, host: &mut dyn MarkupHost, slot: PlacementSlot, ad: Option<&Ad>) {
        let key = ad.map(|a| MountKey {
            ad_id: a.id.clone(),
            slot,
        });
        if key == self.mounted {
            return;
        }

        host.clear();
        self.mounted = None;

        let Some(ad) = ad else {
            return;
        };

        // Empty markup renders nothing, but the key is still recorded so the
        // next render pass does not churn the container.
        if !ad.markup.is_empty() {
            if let Err(e) = host.mount(&ad.markup) {
                warn!(ad_id = %ad.id, slot = %slot, error = %e, "ad markup failed to mount");
                host.clear();
            }
        }
        self.mounted = key;
    }
}

/// A node mounted into a [`FragmentHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Element { tag: String, raw: String },
    Text(String),
}

/// In-memory host implementation: parses markup into fragment nodes and
/// records every script body it "executes".
#[derive(Debug, Default)]
pub struct FragmentHost {
    nodes: Vec<FragmentNode>,
    scripts_run: Vec<String>,
}

impl FragmentHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[FragmentNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every script body run since the host was created. Clearing the
    /// container does not un-run a script; the injector's keying is what
    /// prevents duplicate execution.
    pub fn scripts_run(&self) -> &[String] {
        &self.scripts_run
    }
}

impl MarkupHost for FragmentHost {
    fn mount(&mut self, markup: &str) -> Result<(), String> {
        let (nodes, scripts) = parse_fragment(markup)?;
        self.nodes.extend(nodes);
        self.scripts_run.extend(scripts);
        Ok(())
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Parses an HTML fragment into top-level nodes plus the bodies of all
/// `<script>` elements found at any depth. Malformed markup is an error,
/// never a panic.
fn parse_fragment(markup: &str) -> Result<(Vec<FragmentNode>, Vec<String>), String> {
    let mut nodes = Vec::new();
    let mut scripts = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut top_start = 0usize;
    let mut i = 0usize;

    while i < markup.len() {
        if !markup[i..].starts_with('<') {
            let end = markup[i..]
                .find('<')
                .map(|off| i + off)
                .unwrap_or(markup.len());
            if stack.is_empty() {
                let text = &markup[i..end];
                if !text.trim().is_empty() {
                    nodes.push(FragmentNode::Text(text.to_string()));
                }
            }
            i = end;
            continue;
        }

        if markup[i..].starts_with("<!--") {
            let close = markup[i..]
                .find("-->")
                .ok_or_else(|| "unterminated comment".to_string())?;
            i += close + 3;
            continue;
        }

        let gt = markup[i..]
            .find('>')
            .map(|off| i + off)
            .ok_or_else(|| "unterminated tag".to_string())?;
        let inner = &markup[i + 1..gt];

        if let Some(name) = inner.strip_prefix('/') {
            let name = name.trim().to_ascii_lowercase();
            match stack.pop() {
                Some(open) if open == name => {}
                Some(open) => return Err(format!("mismatched closing tag </{}> for <{}>", name, open)),
                None => return Err(format!("unexpected closing tag </{}>", name)),
            }
            if stack.is_empty() {
                nodes.push(FragmentNode::Element {
                    tag: name,
                    raw: markup[top_start..=gt].to_string(),
                });
            }
            i = gt + 1;
            continue;
        }

        let name: String = inner
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect::<String>()
            .to_ascii_lowercase();
        if name.is_empty() {
            return Err(format!("stray '<' at byte {}", i));
        }
        let self_closing = inner.trim_end().ends_with('/');

        if name == "script" && !self_closing {
            let body_start = gt + 1;
            let close = markup[body_start..]
                .find("</script>")
                .map(|off| body_start + off)
                .ok_or_else(|| "unclosed <script>".to_string())?;
            scripts.push(markup[body_start..close].to_string());
            let end = close + "</script>".len();
            if stack.is_empty() {
                nodes.push(FragmentNode::Element {
                    tag: name,
                    raw: markup[i..end].to_string(),
                });
            }
            i = end;
            continue;
        }

        if self_closing || VOID_TAGS.contains(&name.as_str()) {
            if stack.is_empty() {
                nodes.push(FragmentNode::Element {
                    tag: name,
                    raw: markup[i..=gt].to_string(),
                });
            }
        } else {
            if stack.is_empty() {
                top_start = i;
            }
            stack.push(name);
        }
        i = gt + 1;
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open));
    }
    Ok((nodes, scripts))
}
