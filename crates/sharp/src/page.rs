//! # SHARP Landing Page
//!
//! Registers every animated or hoverable element of the landing page on a
//! [`MotionStage`]:
//!
//! ```text
//! hero ─ title (spotlight, mount reveal), subtitle, 2 magnetic buttons
//! marquee ─ row
//! about ─ copy, image
//! services ─ header, 4 cards
//! gallery ─ header, 6 tiles (hover scale)
//! team ─ header, 3 barber cards
//! reviews ─ header, 3 cards
//! contact ─ copy (magnetic button), map
//! footer ─ 2 social links, 4 links
//! nav ─ logo, 4 links (fixed, on top)
//! ```
//!
//! Static copy is not modelled; only what moves or reacts to the pointer.

use sharp_motion::{
    Easing, ElementFlags, ElementId, ElementKind, MarqueeStrip, MotionResult, MotionStage, Rect,
    RevealSpec, RowLayout,
};

/// Navigation link labels.
pub const NAV_LINKS: [&str; 4] = ["Home", "Services", "About", "Contact"];

/// Phrases scrolling through the marquee, in order.
pub const MARQUEE_PHRASES: [&str; 4] = [
    "Walk-ins Welcome",
    "Premium Products",
    "Expert Barbers",
    "Cold Drinks",
];

/// Separator drawn after every marquee phrase.
pub const MARQUEE_SEPARATOR: &str = "·";

/// Horizontal gap between marquee items in pixels.
pub const MARQUEE_GAP: f32 = 48.0;

/// Advance of one glyph in the marquee's uppercase display face.
pub const MARQUEE_GLYPH: f32 = 22.0;

/// Service menu: title and price in dollars.
pub const SERVICES: [(&str, u32); 4] = [
    ("The Classic Cut", 35),
    ("Beard Sculpting", 25),
    ("Hot Towel Shave", 40),
    ("Full Service", 65),
];

/// Gallery tile categories.
pub const GALLERY: [&str; 6] = ["Fades", "Beards", "Classic", "Modern", "Styling", "Coloring"];

/// Barbers on the team.
pub const BARBERS: [&str; 3] = ["Marcus Steel", "Alex Blade", "Jordan Sharp"];

/// Reviewers.
pub const REVIEWS: [&str; 3] = ["David M.", "Carlos R.", "James L."];

const INTERACTIVE: ElementFlags = ElementFlags::from_bits(ElementFlags::INTERACTIVE);
const MAGNETIC: ElementFlags = ElementFlags::from_bits(ElementFlags::MAGNETIC);
const TILE: ElementFlags =
    ElementFlags::from_bits(ElementFlags::INTERACTIVE | ElementFlags::HOVER_SCALE);

/// A titled section with a row or grid of items.
#[derive(Debug, Clone)]
pub struct ItemSection {
    /// Section root.
    pub section: ElementId,
    /// Fading title block.
    pub header: ElementId,
    /// Items in display order.
    pub items: Vec<ElementId>,
}

/// Handles to every registered element.
#[derive(Debug, Clone)]
pub struct LandingPage {
    /// Fixed navigation bar.
    pub nav: ElementId,
    /// Nav links, in [`NAV_LINKS`] order.
    pub nav_links: Vec<ElementId>,
    /// Full-viewport hero section; the spotlight region.
    pub hero: ElementId,
    /// "SHARP." heading.
    pub hero_title: ElementId,
    /// Tagline under the heading.
    pub hero_subtitle: ElementId,
    /// "Book Now" and "Services".
    pub hero_buttons: [ElementId; 2],
    /// Marquee band.
    pub marquee: ElementId,
    /// The translating row inside the band.
    pub marquee_row: ElementId,
    /// About section root.
    pub about: ElementId,
    /// About text column.
    pub about_copy: ElementId,
    /// About image.
    pub about_image: ElementId,
    /// Service menu.
    pub services: ItemSection,
    /// Portfolio grid.
    pub gallery: ItemSection,
    /// Team cards.
    pub team: ItemSection,
    /// Testimonials.
    pub reviews: ItemSection,
    /// Contact section root.
    pub contact: ElementId,
    /// Contact text column.
    pub contact_copy: ElementId,
    /// "Book Appointment" button.
    pub contact_button: ElementId,
    /// Map panel.
    pub contact_map: ElementId,
    /// Footer.
    pub footer: ElementId,
    /// Footer social icons and text links.
    pub footer_links: Vec<ElementId>,
}

/// The marquee content: every phrase followed by a separator, twice.
///
/// # Errors
///
/// Never for the built-in phrases; propagated from [`MarqueeStrip`].
pub fn marquee_strip() -> MotionResult<MarqueeStrip> {
    let cycle: Vec<&str> = MARQUEE_PHRASES
        .iter()
        .flat_map(|phrase| [*phrase, MARQUEE_SEPARATOR])
        .collect();
    MarqueeStrip::from_cycle(&cycle, 2)
}

/// Width of one marquee item in pixels.
#[must_use]
pub fn measure_marquee_item(item: &str) -> f32 {
    item.chars().count() as f32 * MARQUEE_GLYPH
}

impl LandingPage {
    /// Registers the whole page on `stage`.
    ///
    /// # Errors
    ///
    /// Propagates registration errors, e.g. when mounting twice on one stage.
    pub fn mount(stage: &mut MotionStage) -> MotionResult<Self> {
        let base = RevealSpec::from_config(&stage.config().reveal);
        let none = ElementFlags::NONE;

        // hero
        let hero = stage.add_element(None, ElementKind::Section, none)?;
        let hero_title = stage.add_element(Some(hero), ElementKind::Generic, none)?;
        stage.add_reveal(
            hero_title,
            base.slide_y(100.0).duration(1.0).easing(Easing::EASE_OUT).on_mount(),
        )?;
        let hero_subtitle = stage.add_element(Some(hero), ElementKind::Generic, none)?;
        stage.add_reveal(hero_subtitle, base.delay(0.5).duration(1.0).on_mount())?;
        let hero_buttons = [
            stage.add_element(Some(hero), ElementKind::Button, MAGNETIC)?,
            stage.add_element(Some(hero), ElementKind::Button, MAGNETIC)?,
        ];
        stage.set_spotlight_region(hero)?;

        // marquee
        let marquee = stage.add_element(None, ElementKind::Section, none)?;
        let marquee_row = stage.add_element(Some(marquee), ElementKind::Generic, none)?;
        stage.set_marquee(
            marquee_row,
            &marquee_strip()?,
            &RowLayout::with_gap(MARQUEE_GAP),
            measure_marquee_item,
        )?;

        // about
        let about = stage.add_element(None, ElementKind::Section, none)?;
        let about_copy = stage.add_element(Some(about), ElementKind::Generic, none)?;
        stage.add_reveal(about_copy, base.slide_x(-50.0).duration(0.8))?;
        let about_image = stage.add_element(Some(about), ElementKind::Generic, none)?;
        stage.add_reveal(about_image, base.scale_from(0.9).duration(0.8))?;

        // item sections
        let services = Self::mount_items(stage, base, SERVICES.len(), INTERACTIVE, |spec| {
            spec.slide_x(-50.0).stagger(0.1).duration(0.5)
        })?;
        let gallery = Self::mount_items(stage, base, GALLERY.len(), TILE, |spec| {
            spec.slide_y(30.0).stagger(0.1).duration(0.5)
        })?;
        let team = Self::mount_items(stage, base, BARBERS.len(), INTERACTIVE, |spec| {
            spec.slide_y(50.0).stagger(0.2).duration(0.6)
        })?;
        let reviews = Self::mount_items(stage, base, REVIEWS.len(), INTERACTIVE, |spec| {
            spec.slide_y(30.0).stagger(0.15).duration(0.5)
        })?;

        // contact
        let contact = stage.add_element(None, ElementKind::Section, none)?;
        let contact_copy = stage.add_element(Some(contact), ElementKind::Generic, none)?;
        stage.add_reveal(contact_copy, base.slide_x(-50.0).duration(0.8))?;
        let contact_button = stage.add_element(Some(contact_copy), ElementKind::Button, MAGNETIC)?;
        let contact_map = stage.add_element(Some(contact), ElementKind::Generic, none)?;
        stage.add_reveal(contact_map, base.scale_from(0.95).duration(0.8))?;

        // footer
        let footer = stage.add_element(None, ElementKind::Section, none)?;
        let footer_links = (0..2 + NAV_LINKS.len())
            .map(|_| stage.add_element(Some(footer), ElementKind::Anchor, INTERACTIVE))
            .collect::<MotionResult<Vec<_>>>()?;

        // nav last: it is fixed above the page, so hit tests must find it first
        let nav = stage.add_element(None, ElementKind::Generic, none)?;
        stage.add_element(Some(nav), ElementKind::Generic, none)?;
        let nav_links = NAV_LINKS
            .iter()
            .map(|_| stage.add_element(Some(nav), ElementKind::Anchor, INTERACTIVE))
            .collect::<MotionResult<Vec<_>>>()?;

        tracing::debug!(elements = stage.tree().len(), reveals = stage.reveals().len(), "landing page mounted");

        Ok(Self {
            nav,
            nav_links,
            hero,
            hero_title,
            hero_subtitle,
            hero_buttons,
            marquee,
            marquee_row,
            about,
            about_copy,
            about_image,
            services,
            gallery,
            team,
            reviews,
            contact,
            contact_copy,
            contact_button,
            contact_map,
            footer,
            footer_links,
        })
    }

    fn mount_items(
        stage: &mut MotionStage,
        base: RevealSpec,
        count: usize,
        flags: ElementFlags,
        item_spec: impl Fn(RevealSpec) -> RevealSpec,
    ) -> MotionResult<ItemSection> {
        let section = stage.add_element(None, ElementKind::Section, ElementFlags::NONE)?;
        let header = stage.add_element(Some(section), ElementKind::Generic, ElementFlags::NONE)?;
        stage.add_reveal(header, base)?;

        let mut items = Vec::with_capacity(count);
        for order in 0..count {
            let item = stage.add_element(Some(section), ElementKind::Generic, flags)?;
            let order = u32::try_from(order).unwrap_or(u32::MAX);
            stage.add_reveal(item, item_spec(base).order(order))?;
            items.push(item);
        }
        Ok(ItemSection {
            section,
            header,
            items,
        })
    }

    /// Document-space boxes for a `width × height` viewport.
    ///
    /// A simplified single-column rendition of the real layout: close enough
    /// for hit testing and scroll visibility in scripted sessions.
    #[must_use]
    pub fn layout(&self, width: f32, height: f32) -> Vec<(ElementId, Rect)> {
        let mut boxes = Vec::new();
        let pad = 32.0;
        let inner = (width - 2.0 * pad).max(0.0);

        // nav is fixed at the top of the viewport
        boxes.push((self.nav, Rect::new(0.0, 0.0, width, 96.0)));
        let link_xs = RowLayout::with_gap(32.0).arrange(width - 4.0 * 100.0 - pad, &[68.0; 4]);
        for (link, x) in self.nav_links.iter().zip(link_xs) {
            boxes.push((*link, Rect::new(x, 36.0, 68.0, 24.0)));
        }

        let mut y = 0.0;
        boxes.push((self.hero, Rect::new(0.0, y, width, height)));
        boxes.push((self.hero_title, Rect::new(pad, height * 0.25, inner, width * 0.12)));
        boxes.push((self.hero_subtitle, Rect::new(pad, height * 0.25 + width * 0.12 + 32.0, inner, 32.0)));
        let button_xs = RowLayout::with_gap(24.0).arrange(width / 2.0 - 212.0, &[200.0, 200.0]);
        for (button, x) in self.hero_buttons.iter().zip(button_xs) {
            boxes.push((*button, Rect::new(x, height * 0.7, 200.0, 56.0)));
        }
        y += height;

        boxes.push((self.marquee, Rect::new(0.0, y, width, 160.0)));
        boxes.push((self.marquee_row, Rect::new(0.0, y + 48.0, width * 3.0, 64.0)));
        y += 160.0;

        let half = inner / 2.0;
        boxes.push((self.about, Rect::new(0.0, y, width, 700.0)));
        boxes.push((self.about_copy, Rect::new(pad, y + 128.0, half - 32.0, 440.0)));
        boxes.push((self.about_image, Rect::new(pad + half + 32.0, y + 128.0, half - 32.0, 440.0)));
        y += 700.0;

        for (section, item_height, columns) in [
            (&self.services, 140.0, 1),
            (&self.gallery, inner / 3.0, 3),
            (&self.team, 520.0, 3),
            (&self.reviews, 280.0, 3),
        ] {
            y = Self::layout_items(&mut boxes, section, y, pad, inner, item_height, columns);
        }

        boxes.push((self.contact, Rect::new(0.0, y, width, 800.0)));
        boxes.push((self.contact_copy, Rect::new(pad, y + 128.0, half - 32.0, 540.0)));
        boxes.push((self.contact_button, Rect::new(pad, y + 580.0, 300.0, 68.0)));
        boxes.push((self.contact_map, Rect::new(pad + half + 32.0, y + 128.0, half - 32.0, 540.0)));
        y += 800.0;

        boxes.push((self.footer, Rect::new(0.0, y, width, 240.0)));
        let footer_xs = RowLayout::with_gap(16.0).arrange(pad, &[48.0; 6]);
        for (link, x) in self.footer_links.iter().zip(footer_xs) {
            boxes.push((*link, Rect::new(x, y + 96.0, 48.0, 48.0)));
        }
        boxes
    }

    fn layout_items(
        boxes: &mut Vec<(ElementId, Rect)>,
        section: &ItemSection,
        top: f32,
        pad: f32,
        inner: f32,
        item_height: f32,
        columns: usize,
    ) -> f32 {
        let gap = 32.0;
        let header_height = 200.0;
        let rows = section.items.len().div_ceil(columns);
        let height = 128.0 + header_height + rows as f32 * (item_height + gap) + 128.0;
        let item_width = (inner - gap * (columns as f32 - 1.0)) / columns as f32;

        boxes.push((section.section, Rect::new(0.0, top, inner + 2.0 * pad, height)));
        boxes.push((section.header, Rect::new(pad, top + 128.0, inner, header_height - gap)));
        for (i, item) in section.items.iter().enumerate() {
            let (row, col) = (i / columns, i % columns);
            boxes.push((
                *item,
                Rect::new(
                    pad + col as f32 * (item_width + gap),
                    top + 128.0 + header_height + row as f32 * (item_height + gap),
                    item_width,
                    item_height,
                ),
            ));
        }
        top + height
    }

    /// Total document height for a `width × height` viewport.
    #[must_use]
    pub fn document_height(&self, width: f32, height: f32) -> f32 {
        self.layout(width, height)
            .iter()
            .map(|(_, rect)| rect.bottom())
            .fold(height, f32::max)
    }

    /// Every element with an entrance reveal.
    #[must_use]
    pub fn revealed_elements(&self) -> Vec<ElementId> {
        let mut out = vec![
            self.hero_title,
            self.hero_subtitle,
            self.about_copy,
            self.about_image,
        ];
        for section in [&self.services, &self.gallery, &self.team, &self.reviews] {
            out.push(section.header);
            out.extend(&section.items);
        }
        out.extend([self.contact_copy, self.contact_map]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharp_motion::MotionConfig;

    #[test]
    fn test_marquee_strip_is_seamless() {
        let strip = marquee_strip().unwrap();
        assert_eq!(strip.items().len(), 16);
        assert_eq!(strip.cycle()[0], "Walk-ins Welcome");
        assert_eq!(strip.cycle()[7], MARQUEE_SEPARATOR);
    }

    #[test]
    fn test_marquee_travels_one_cycle() {
        let mut stage = MotionStage::new(MotionConfig::default()).unwrap();
        LandingPage::mount(&mut stage).unwrap();

        // 57 phrase glyphs and 4 separators at 22 px, 8 gaps of 48 px
        let cycle = 61.0 * MARQUEE_GLYPH + 8.0 * MARQUEE_GAP;
        let marquee = stage.marquee().unwrap();
        assert_eq!(marquee.distance(), cycle);
        let end = marquee.offset_at(marquee.period() - 1e-9);
        assert!((end + cycle).abs() < 1e-3);
    }

    #[test]
    fn test_mount_registers_everything() {
        let mut stage = MotionStage::new(MotionConfig::default()).unwrap();
        let page = LandingPage::mount(&mut stage).unwrap();

        assert_eq!(page.nav_links.len(), 4);
        assert_eq!(page.gallery.items.len(), 6);
        assert_eq!(stage.reveals().len(), page.revealed_elements().len());
        assert!(stage.magnet(page.contact_button).is_some());
        assert!(stage.hover_scale(page.gallery.items[5]).is_some());
        assert_eq!(stage.spotlight().map(|s| s.region()), Some(page.hero));
    }

    #[test]
    fn test_layout_covers_every_element() {
        let mut stage = MotionStage::new(MotionConfig::default()).unwrap();
        let page = LandingPage::mount(&mut stage).unwrap();
        let boxes = page.layout(1280.0, 800.0);

        // everything but the nav logo gets a box
        assert_eq!(boxes.len(), stage.tree().len() - 1);
        assert!(boxes.iter().all(|(_, rect)| !rect.is_empty()));
        assert!(page.document_height(1280.0, 800.0) > 4000.0);
    }
}
