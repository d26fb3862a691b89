//! Image carousel: one image at a time, wraparound navigation, and a
//! fullscreen overlay with a thumbnail strip.
//!
//! ## State
//!
//! ```text
//! images     [a, b, c]        display order
//! index      0..len           meaningless (and not exposed) when len == 0
//! direction  Forward|Backward last navigation, only feeds the slide animation
//! fullscreen Option<guard>    Some while the overlay is up
//! ```
//!
//! The arrow/Escape bindings exist only in fullscreen. Entering fullscreen
//! registers a key listener on the [`Document`] and keeps the guard in
//! `fullscreen`; leaving fullscreen (Escape, close button, overlay click) or
//! dropping the carousel drops the guard, so the listener cannot outlive
//! the overlay.
//!
//! ## Empty and single-image sets
//!
//! An empty set renders the fallback style token and nothing else; every
//! operation is a no-op. A single image renders without navigation chrome, so
//! `next`/`previous` are no-ops there too.

use crate::host::{Document, EventKind, Key, Listener, ListenerGuard};
use log::warn;
use serde::Serialize;

/// Which way the last navigation went. Cosmetic: picks the slide animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Horizontal offset sign for the entering slide.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// A completed move from one image to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// Something the carousel did in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum CarouselEvent {
    Slide(Slide),
    FullscreenEntered,
    FullscreenExited,
}

/// Clickable parts of the carousel.
///
/// Inline targets are only reachable while the overlay is down, overlay
/// targets only while it is up. `OverlayImage` and `ThumbnailStrip` are the
/// contained areas of the overlay: clicking them does nothing, and in
/// particular does not count as a click on the overlay background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselTarget {
    Image,
    Expand,
    Previous,
    Next,
    Dot(usize),
    Overlay,
    OverlayImage,
    OverlayClose,
    OverlayPrevious,
    OverlayNext,
    ThumbnailStrip,
    Thumbnail(usize),
}

impl CarouselTarget {
    fn is_overlay(self) -> bool {
        matches!(
            self,
            CarouselTarget::Overlay
                | CarouselTarget::OverlayImage
                | CarouselTarget::OverlayClose
                | CarouselTarget::OverlayPrevious
                | CarouselTarget::OverlayNext
                | CarouselTarget::ThumbnailStrip
                | CarouselTarget::Thumbnail(_)
        )
    }
}

#[derive(Debug)]
pub struct Carousel {
    document: Document,
    images: Vec<String>,
    fallback: String,
    index: usize,
    direction: Direction,
    fullscreen: Option<ListenerGuard>,
}

impl Carousel {
    /// Mount a carousel at the first image.
    pub fn new(document: &Document, images: Vec<String>, fallback: impl Into<String>) -> Self {
        Self {
            document: document.clone(),
            images,
            fallback: fallback.into(),
            index: 0,
            direction: Direction::Forward,
            fullscreen: None,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Style token rendered instead of any image chrome when the set is empty.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_some()
    }

    /// Whether previous/next controls, the indicator and dots are shown.
    pub fn has_navigation(&self) -> bool {
        self.len() > 1
    }

    /// Compact position indicator, e.g. `2/4`. Absent without navigation.
    pub fn indicator(&self) -> Option<String> {
        self.has_navigation()
            .then(|| format!("{}/{}", self.index + 1, self.len()))
    }

    /// Fullscreen counter, e.g. `2 / 4`. Shown even for a single image.
    pub fn counter(&self) -> Option<String> {
        self.current_index()
            .map(|i| format!("{} / {}", i + 1, self.len()))
    }

    pub fn next(&mut self) -> Option<Slide> {
        if !self.has_navigation() {
            return None;
        }
        let to = (self.index + 1) % self.len();
        Some(self.move_to(to, Direction::Forward))
    }

    pub fn previous(&mut self) -> Option<Slide> {
        if !self.has_navigation() {
            return None;
        }
        let len = self.len();
        let to = (self.index + len - 1) % len;
        Some(self.move_to(to, Direction::Backward))
    }

    /// Jump straight to `index`.
    ///
    /// Out-of-range indexes are ignored. Selecting the current image is a
    /// no-op, which makes repeated selection idempotent.
    pub fn select_index(&mut self, index: usize) -> Option<Slide> {
        if index >= self.len() {
            warn!(
                "ignoring carousel selection {index} (only {} images)",
                self.len()
            );
            return None;
        }
        if index == self.index {
            return None;
        }
        let direction = if index > self.index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Some(self.move_to(index, direction))
    }

    /// Bring up the overlay at the current image. Attaches the key listener.
    pub fn enter_fullscreen(&mut self) -> bool {
        if self.is_empty() || self.is_fullscreen() {
            return false;
        }
        self.fullscreen = Some(self.document.listen(EventKind::KeyDown, Listener::CarouselKeys));
        true
    }

    /// Take down the overlay. Detaches the key listener.
    pub fn exit_fullscreen(&mut self) -> bool {
        self.fullscreen.take().is_some()
    }

    /// Keys the fullscreen listener claims.
    pub fn binds(key: &Key) -> bool {
        matches!(key, Key::Escape | Key::ArrowLeft | Key::ArrowRight)
    }

    /// Handle a key delivered to the fullscreen listener.
    pub fn handle_key(&mut self, key: &Key) -> Option<CarouselEvent> {
        if !self.is_fullscreen() {
            return None;
        }
        match key {
            Key::Escape => self
                .exit_fullscreen()
                .then_some(CarouselEvent::FullscreenExited),
            Key::ArrowLeft => self.previous().map(CarouselEvent::Slide),
            Key::ArrowRight => self.next().map(CarouselEvent::Slide),
            Key::Other(_) => None,
        }
    }

    pub fn click(&mut self, target: CarouselTarget) -> Option<CarouselEvent> {
        if self.is_empty() || target.is_overlay() != self.is_fullscreen() {
            return None;
        }
        match target {
            CarouselTarget::Image | CarouselTarget::Expand => self
                .enter_fullscreen()
                .then_some(CarouselEvent::FullscreenEntered),
            CarouselTarget::Overlay | CarouselTarget::OverlayClose => self
                .exit_fullscreen()
                .then_some(CarouselEvent::FullscreenExited),
            CarouselTarget::Previous | CarouselTarget::OverlayPrevious => {
                self.previous().map(CarouselEvent::Slide)
            }
            CarouselTarget::Next | CarouselTarget::OverlayNext => {
                self.next().map(CarouselEvent::Slide)
            }
            CarouselTarget::Dot(i) | CarouselTarget::Thumbnail(i) => {
                self.select_index(i).map(CarouselEvent::Slide)
            }
            CarouselTarget::OverlayImage | CarouselTarget::ThumbnailStrip => None,
        }
    }

    fn move_to(&mut self, to: usize, direction: Direction) -> Slide {
        let from = self.index;
        self.index = to;
        self.direction = direction;
        Slide {
            from,
            to,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(doc: &Document, n: usize) -> Carousel {
        let images = (0..n).map(|i| format!("/img-{i}.png")).collect();
        Carousel::new(doc, images, "gradient-blue")
    }

    #[test]
    fn abc_scenario() {
        let doc = Document::new();
        let mut c = Carousel::new(
            &doc,
            vec!["a".into(), "b".into(), "c".into()],
            "gradient-blue",
        );
        assert_eq!(c.current_index(), Some(0));
        c.next();
        assert_eq!(c.current_index(), Some(1));
        c.next();
        assert_eq!(c.current_index(), Some(2));
        c.next();
        assert_eq!(c.current_index(), Some(0));
        c.previous();
        assert_eq!(c.current_index(), Some(2));
        c.select_index(0);
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.current_image(), Some("a"));
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let doc = Document::new();
        for n in 1..=6 {
            let mut c = carousel(&doc, n);
            // Deterministic mixed walk: forward on bit set, backward otherwise.
            let pattern: u64 = 0b1011_0010_1110_0101_1100_0111;
            for step in 0..48 {
                if pattern >> (step % 24) & 1 == 1 {
                    c.next();
                } else {
                    c.previous();
                }
                let i = c.current_index().unwrap();
                assert!(i < n, "index {i} out of bounds for {n} images");
            }
        }
    }

    #[test]
    fn next_and_previous_are_inverse() {
        let doc = Document::new();
        for n in 2..=5 {
            for start in 0..n {
                let mut c = carousel(&doc, n);
                c.select_index(start);
                c.next();
                c.previous();
                assert_eq!(c.current_index(), Some(start));
                c.previous();
                c.next();
                assert_eq!(c.current_index(), Some(start));
            }
        }
    }

    #[test]
    fn next_wraps_and_reports_slide() {
        let doc = Document::new();
        let mut c = carousel(&doc, 3);
        c.select_index(2);
        let slide = c.next().unwrap();
        assert_eq!(
            slide,
            Slide {
                from: 2,
                to: 0,
                direction: Direction::Forward
            }
        );
    }

    #[test]
    fn previous_wraps_backward() {
        let doc = Document::new();
        let mut c = carousel(&doc, 4);
        let slide = c.previous().unwrap();
        assert_eq!(slide.to, 3);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn select_index_is_idempotent() {
        let doc = Document::new();
        let mut c = carousel(&doc, 4);
        assert!(c.select_index(2).is_some());
        let direction = c.direction();
        assert!(c.select_index(2).is_none());
        assert_eq!(c.current_index(), Some(2));
        assert_eq!(c.direction(), direction);
    }

    #[test]
    fn select_index_infers_direction() {
        let doc = Document::new();
        let mut c = carousel(&doc, 4);
        c.select_index(3);
        assert_eq!(c.direction(), Direction::Forward);
        c.select_index(1);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn select_index_out_of_range_is_ignored() {
        let doc = Document::new();
        let mut c = carousel(&doc, 3);
        c.select_index(1);
        assert!(c.select_index(3).is_none());
        assert!(c.select_index(usize::MAX).is_none());
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn empty_set_tracks_no_index() {
        let doc = Document::new();
        let mut c = carousel(&doc, 0);
        assert_eq!(c.current_index(), None);
        assert_eq!(c.current_image(), None);
        assert_eq!(c.indicator(), None);
        assert!(c.next().is_none());
        assert!(c.previous().is_none());
        assert!(c.select_index(0).is_none());
        assert!(!c.enter_fullscreen());
        assert_eq!(c.fallback(), "gradient-blue");
        assert_eq!(doc.listener_count(EventKind::KeyDown), 0);
    }

    #[test]
    fn single_image_has_no_navigation() {
        let doc = Document::new();
        let mut c = carousel(&doc, 1);
        assert!(!c.has_navigation());
        assert_eq!(c.indicator(), None);
        assert!(c.next().is_none());
        assert!(c.previous().is_none());
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.counter().as_deref(), Some("1 / 1"));
    }

    #[test]
    fn indicator_is_one_based() {
        let doc = Document::new();
        let mut c = carousel(&doc, 4);
        c.next();
        assert_eq!(c.indicator().as_deref(), Some("2/4"));
        assert_eq!(c.counter().as_deref(), Some("2 / 4"));
    }

    #[test]
    fn fullscreen_keeps_position_and_holds_listener() {
        let doc = Document::new();
        let mut c = carousel(&doc, 3);
        c.next();
        assert!(c.enter_fullscreen());
        assert!(!c.enter_fullscreen());
        assert_eq!(c.current_index(), Some(1));
        assert_eq!(doc.listeners(EventKind::KeyDown), vec![Listener::CarouselKeys]);

        assert!(c.exit_fullscreen());
        assert!(!c.exit_fullscreen());
        assert_eq!(doc.listener_count(EventKind::KeyDown), 0);
    }

    #[test]
    fn keys_only_work_in_fullscreen() {
        let doc = Document::new();
        let mut c = carousel(&doc, 3);
        assert!(c.handle_key(&Key::ArrowRight).is_none());
        assert_eq!(c.current_index(), Some(0));

        c.enter_fullscreen();
        c.handle_key(&Key::ArrowRight);
        assert_eq!(c.current_index(), Some(1));
        c.handle_key(&Key::ArrowLeft);
        c.handle_key(&Key::ArrowLeft);
        assert_eq!(c.current_index(), Some(2));
        assert!(c.handle_key(&Key::Other("Enter".into())).is_none());

        assert_eq!(
            c.handle_key(&Key::Escape),
            Some(CarouselEvent::FullscreenExited)
        );
        assert!(!c.is_fullscreen());
        assert_eq!(doc.listener_count(EventKind::KeyDown), 0);
    }

    #[test]
    fn dropping_carousel_releases_listener() {
        let doc = Document::new();
        let mut c = carousel(&doc, 2);
        c.enter_fullscreen();
        assert_eq!(doc.listener_count(EventKind::KeyDown), 1);
        drop(c);
        assert_eq!(doc.listener_count(EventKind::KeyDown), 0);
    }

    #[test]
    fn clicks_route_by_mode() {
        let doc = Document::new();
        let mut c = carousel(&doc, 3);

        // Overlay targets are unreachable while inline.
        assert!(c.click(CarouselTarget::OverlayNext).is_none());
        c.click(CarouselTarget::Next);
        c.click(CarouselTarget::Dot(2));
        assert_eq!(c.current_index(), Some(2));

        assert_eq!(
            c.click(CarouselTarget::Expand),
            Some(CarouselEvent::FullscreenEntered)
        );
        // Inline targets are covered by the overlay.
        assert!(c.click(CarouselTarget::Next).is_none());
        c.click(CarouselTarget::OverlayNext);
        assert_eq!(c.current_index(), Some(0));
        c.click(CarouselTarget::Thumbnail(1));
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn contained_overlay_clicks_do_not_close() {
        let doc = Document::new();
        let mut c = carousel(&doc, 3);
        c.click(CarouselTarget::Image);
        assert!(c.click(CarouselTarget::OverlayImage).is_none());
        assert!(c.click(CarouselTarget::ThumbnailStrip).is_none());
        assert!(c.is_fullscreen());

        assert_eq!(
            c.click(CarouselTarget::Overlay),
            Some(CarouselEvent::FullscreenExited)
        );
        assert!(!c.is_fullscreen());
    }

    #[test]
    fn binds_only_navigation_keys() {
        assert!(Carousel::binds(&Key::Escape));
        assert!(Carousel::binds(&Key::ArrowLeft));
        assert!(!Carousel::binds(&Key::Other("a".into())));
    }
}
