//! Resolution of the page's controls into an [`ElementSet`].

use crate::dom::{Document, Element};
use crate::model::PlaybackState;
use crate::variant::{
    SelectorTable, UiVariant, VariantSetting, PAUSE_MARKER_ATTRIBUTE, PAUSE_MARKER_VALUE,
};

/// The three volume slots: time display, slider container and click target.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeElements<E> {
    pub duration: Option<E>,
    pub slider: Option<E>,
    pub click_target: Option<E>,
}

/// Usable controls found on the page at one instant.
///
/// Disabled controls are absent, and at most one of `play`/`pause` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSet<E> {
    pub variant: UiVariant,
    pub play: Option<E>,
    pub pause: Option<E>,
    pub skip: Option<E>,
    pub replay: Option<E>,
    pub like: Option<E>,
    pub dislike: Option<E>,
    pub volume: VolumeElements<E>,
    pub state: PlaybackState,
}

/// Resolves controls with the selector table of the configured variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locator {
    setting: VariantSetting,
}

impl Locator {
    #[must_use]
    pub const fn new(setting: VariantSetting) -> Self {
        Self { setting }
    }

    /// Variant the next resolution against `document` will use.
    pub fn variant<D: Document + ?Sized>(&self, document: &D) -> UiVariant {
        self.setting.resolve(document)
    }

    /// Query the page for every control. Pure; never fails.
    pub fn resolve<D: Document + ?Sized>(&self, document: &D) -> ElementSet<D::Element> {
        let variant = self.variant(document);
        let table: &SelectorTable = variant.selectors();
        let find = |selector: &str| usable(document.query_selector(selector));
        let find_optional = |selector: Option<&str>| selector.and_then(find);

        let mut play = find(table.play);
        let mut pause = None;
        if play.as_ref().is_some_and(renders_as_pause) {
            pause = play.take();
        }
        let state = PlaybackState::from_controls(play.is_some(), pause.is_some());

        ElementSet {
            variant,
            play,
            pause,
            skip: find(table.skip),
            replay: find(table.replay),
            like: find_optional(table.like),
            dislike: find_optional(table.dislike),
            volume: VolumeElements {
                duration: find(table.duration),
                slider: find(table.volume_slider),
                click_target: find(table.volume_click_target),
            },
            state,
        }
    }
}

fn usable<E: Element>(element: Option<E>) -> Option<E> {
    element.filter(|element| !element.is_disabled())
}

fn renders_as_pause<E: Element>(element: &E) -> bool {
    element.attribute(PAUSE_MARKER_ATTRIBUTE).as_deref() == Some(PAUSE_MARKER_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::testing::PlayerPage;

    fn resolve(page: &PlayerPage) -> ElementSet<<MemoryDocument as Document>::Element> {
        Locator::default().resolve(&page.document)
    }

    #[test]
    fn test_play_button_means_paused() {
        let page = PlayerPage::build();
        let elements = resolve(&page);
        assert_eq!(elements.play.as_ref(), Some(&page.play));
        assert!(elements.pause.is_none());
        assert_eq!(elements.state, PlaybackState::Paused);
    }

    #[test]
    fn test_pause_marker_moves_toggle_to_pause_slot() {
        let page = PlayerPage::build();
        page.show_pause();
        let elements = resolve(&page);
        assert!(elements.play.is_none());
        assert_eq!(elements.pause.as_ref(), Some(&page.play));
        assert_eq!(elements.state, PlaybackState::Playing);
    }

    #[test]
    fn test_missing_toggle_means_unknown() {
        let page = PlayerPage::build();
        page.play.remove_attribute("class");
        let elements = resolve(&page);
        assert!(elements.play.is_none());
        assert!(elements.pause.is_none());
        assert_eq!(elements.state, PlaybackState::Unknown);
    }

    #[test]
    fn test_disabled_controls_are_absent() {
        let page = PlayerPage::build();
        page.skip.set_attribute("disabled", "");
        page.like.set_attribute("disabled", "");
        page.volume_click_target.set_attribute("disabled", "");

        let elements = resolve(&page);
        assert!(elements.skip.is_none());
        assert!(elements.like.is_none());
        assert!(elements.volume.click_target.is_none());
        assert!(elements.replay.is_some());
        assert!(elements.dislike.is_some());
    }

    #[test]
    fn test_disabled_pause_is_not_promoted() {
        let page = PlayerPage::build();
        page.show_pause();
        page.play.set_attribute("disabled", "");
        let elements = resolve(&page);
        assert!(elements.play.is_none());
        assert!(elements.pause.is_none());
        assert_eq!(elements.state, PlaybackState::Unknown);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let page = PlayerPage::build();
        page.show_pause();
        page.replay.set_attribute("disabled", "");
        assert_eq!(resolve(&page), resolve(&page));
    }

    #[test]
    fn test_volume_slots() {
        let page = PlayerPage::build();
        let elements = resolve(&page);
        assert_eq!(elements.volume.duration.as_ref(), Some(&page.duration));
        assert_eq!(elements.volume.slider.as_ref(), Some(&page.volume_slider));
        assert_eq!(
            elements.volume.click_target.as_ref(),
            Some(&page.volume_click_target)
        );
    }

    #[test]
    fn test_tuner_variant_has_no_rating_controls() {
        let page = PlayerPage::build_tuner();
        let elements = resolve(&page);
        assert_eq!(elements.variant, UiVariant::Tuner);
        assert!(elements.like.is_none());
        assert!(elements.dislike.is_none());
        assert!(elements.play.is_some());
        assert!(elements.skip.is_some());
    }

    #[test]
    fn test_fixed_variant_skips_detection() {
        let page = PlayerPage::build_tuner();
        let elements = Locator::new(VariantSetting::NowPlaying).resolve(&page.document);
        assert_eq!(elements.variant, UiVariant::NowPlaying);
        assert!(elements.like.is_some());
    }
}
