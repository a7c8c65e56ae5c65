use taffy::TaffyTree;
use taffy::prelude::{AvailableSpace, NodeId, Size};
use taffy::style::{Dimension, Display, FlexDirection, Style};

use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{FolioError, FolioResult};
use crate::scroll::trigger::{RegionId, RegionLayout};

/// Block heights feeding the document layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Hero height in viewport heights.
    pub hero_vh: f64,
    /// Panel height in viewport heights.
    pub panel_vh: f64,
    /// Lower bound for a panel's height in pixels.
    pub min_panel_height: f64,
    /// Footer height in pixels.
    pub footer_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            hero_vh: 1.0,
            panel_vh: 1.0,
            min_panel_height: 0.0,
            footer_height: 640.0,
        }
    }
}

/// Vertical stack of hero, panels and footer in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentLayout {
    viewport: Viewport,
    hero: Rect,
    panels: Vec<Rect>,
    footer: Rect,
    height: f64,
}

impl DocumentLayout {
    /// Lay out `panel_count` panels between the hero and the footer for `viewport`.
    #[tracing::instrument(skip(metrics))]
    pub fn compute(
        viewport: Viewport,
        panel_count: usize,
        metrics: &LayoutMetrics,
    ) -> FolioResult<Self> {
        viewport.validate()?;
        for (name, v) in [
            ("hero_vh", metrics.hero_vh),
            ("panel_vh", metrics.panel_vh),
            ("min_panel_height", metrics.min_panel_height),
            ("footer_height", metrics.footer_height),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(FolioError::validation(format!(
                    "layout metric {name} must be finite and >= 0"
                )));
            }
        }

        let hero_h = viewport.height * metrics.hero_vh;
        let panel_h = (viewport.height * metrics.panel_vh).max(metrics.min_panel_height);

        let mut tree: TaffyTree<()> = TaffyTree::new();
        let hero = block(&mut tree, hero_h).map_err(layout_err)?;
        let mut panels = Vec::with_capacity(panel_count);
        for _ in 0..panel_count {
            panels.push(block(&mut tree, panel_h).map_err(layout_err)?);
        }
        let footer = block(&mut tree, metrics.footer_height).map_err(layout_err)?;

        let mut children = Vec::with_capacity(panel_count + 2);
        children.push(hero);
        children.extend(panels.iter().copied());
        children.push(footer);

        let root = tree
            .new_with_children(
                Style {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    size: Size {
                        width: Dimension::length(viewport.width as f32),
                        height: Dimension::auto(),
                    },
                    ..Style::default()
                },
                &children,
            )
            .map_err(layout_err)?;
        tree.compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(viewport.width as f32),
                height: AvailableSpace::MaxContent,
            },
        )
        .map_err(layout_err)?;

        let rect_of = |id: NodeId| -> FolioResult<Rect> {
            let l = tree.layout(id).map_err(layout_err)?;
            let (x, y) = (f64::from(l.location.x), f64::from(l.location.y));
            Ok(Rect::new(
                x,
                y,
                x + f64::from(l.size.width),
                y + f64::from(l.size.height),
            ))
        };

        let out = Self {
            viewport,
            hero: rect_of(hero)?,
            panels: panels
                .iter()
                .map(|&id| rect_of(id))
                .collect::<FolioResult<Vec<_>>>()?,
            footer: rect_of(footer)?,
            height: f64::from(tree.layout(root).map_err(layout_err)?.size.height),
        };
        tracing::debug!(height = out.height, panels = panel_count, "document laid out");
        Ok(out)
    }

    /// Viewport the layout was computed for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Total document height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Largest reachable scroll offset (never negative).
    pub fn max_scroll(&self) -> f64 {
        (self.height - self.viewport.height).max(0.0)
    }

    /// Number of laid-out panels.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Bounds of panel `index`.
    pub fn panel(&self, index: usize) -> Option<Rect> {
        self.panels.get(index).copied()
    }

    /// Bounds of the hero.
    pub fn hero(&self) -> Rect {
        self.hero
    }

    /// Bounds of the footer.
    pub fn footer(&self) -> Rect {
        self.footer
    }

    /// Panel containing document offset `doc_y`, if any.
    pub fn panel_at(&self, doc_y: f64) -> Option<usize> {
        self.panels
            .iter()
            .position(|r| doc_y >= r.y0 && doc_y < r.y1)
    }
}

impl RegionLayout for DocumentLayout {
    fn region_rect(&self, region: RegionId) -> Option<Rect> {
        match region {
            RegionId::Document => Some(Rect::new(0.0, 0.0, self.viewport.width, self.height)),
            RegionId::Hero => Some(self.hero),
            RegionId::Panel(i) => self.panel(i),
            RegionId::Footer => Some(self.footer),
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

fn block(tree: &mut TaffyTree<()>, height: f64) -> Result<NodeId, taffy::TaffyError> {
    tree.new_leaf(Style {
        size: Size {
            width: Dimension::percent(1.0),
            height: Dimension::length(height as f32),
        },
        flex_shrink: 0.0,
        ..Style::default()
    })
}

fn layout_err(err: taffy::TaffyError) -> FolioError {
    FolioError::layout(err.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/document.rs"]
mod tests;
