//! Scoped colour-mode override.
//!
//! `ColorModeGuard::force` switches the host into a mode and remembers the previous
//! one; dropping the guard restores it. Drop runs on every exit path of the capture,
//! including `?` early returns, a dropped future and unwinding.

use tracing::debug;

use crate::host::ColorModeFlag;
use crate::theme::ColorMode;

#[must_use = "the override is reverted as soon as the guard is dropped"]
pub struct ColorModeGuard<'a> {
    flag: &'a ColorModeFlag,
    previous: ColorMode,
}

impl<'a> ColorModeGuard<'a> {
    pub fn force(flag: &'a ColorModeFlag, mode: ColorMode) -> Self {
        let previous = flag.replace(mode);
        if previous != mode {
            debug!(?previous, forced = ?mode, "colour mode overridden for capture");
        }
        ColorModeGuard { flag, previous }
    }

    pub fn previous(&self) -> ColorMode {
        self.previous
    }
}

impl Drop for ColorModeGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_dark_mode() {
        let flag = ColorModeFlag::new(ColorMode::Dark);
        {
            let guard = ColorModeGuard::force(&flag, ColorMode::Light);
            assert_eq!(guard.previous(), ColorMode::Dark);
            assert_eq!(flag.get(), ColorMode::Light);
        }
        assert_eq!(flag.get(), ColorMode::Dark);
    }

    #[test]
    fn test_guard_is_noop_in_light_mode() {
        let flag = ColorModeFlag::new(ColorMode::Light);
        drop(ColorModeGuard::force(&flag, ColorMode::Light));
        assert_eq!(flag.get(), ColorMode::Light);
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn capture(flag: &ColorModeFlag, fail: bool) -> Result<(), &'static str> {
            let _guard = ColorModeGuard::force(flag, ColorMode::Light);
            if fail {
                return Err("capture failed");
            }
            Ok(())
        }
        let flag = ColorModeFlag::new(ColorMode::Dark);
        assert!(capture(&flag, true).is_err());
        assert_eq!(flag.get(), ColorMode::Dark);
        assert!(capture(&flag, false).is_ok());
        assert_eq!(flag.get(), ColorMode::Dark);
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let flag = ColorModeFlag::new(ColorMode::Dark);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = ColorModeGuard::force(&flag, ColorMode::Light);
            panic!("rasterizer blew up");
        }));
        assert!(result.is_err());
        assert_eq!(flag.get(), ColorMode::Dark);
    }
}
