// ============================================================================
// BANNER - Mensajes transitorios de éxito/error de una página
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use crate::utils::BANNER_TIMEOUT_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

/// Un solo banner visible; cada `show` invalida el auto-dismiss anterior
#[derive(Debug, Default)]
pub struct BannerState {
    current: Option<Banner>,
    generation: u64,
}

impl BannerState {
    pub fn show(&mut self, kind: BannerKind, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.current = Some(Banner {
            kind,
            message: message.into(),
        });
        self.generation
    }

    /// Oculta el banner solo si sigue siendo el mismo que se programó
    pub fn dismiss_if(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }
}

/// Muestra un banner y programa su cierre tras BANNER_TIMEOUT_MS
pub fn flash(banner: &Rc<RefCell<BannerState>>, kind: BannerKind, message: impl Into<String>) {
    let generation = banner.borrow_mut().show(kind, message);
    let banner = banner.clone();
    Timeout::new(BANNER_TIMEOUT_MS, move || {
        if banner.borrow_mut().dismiss_if(generation) {
            crate::rerender_app();
        }
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_timer_does_not_hide_newer_banner() {
        let mut state = BannerState::default();
        let first = state.show(BannerKind::Success, "Saved");
        let second = state.show(BannerKind::Error, "Failed");

        assert!(!state.dismiss_if(first));
        assert_eq!(state.current().map(|b| b.kind), Some(BannerKind::Error));

        assert!(state.dismiss_if(second));
        assert!(state.current().is_none());
    }
}
