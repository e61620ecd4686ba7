//! Window configuration for the desktop app.

use macroquad::window::Conf;

use crate::APP_NAME;

/// One chunk is 18 tiles wide at 50 px; the window shows it edge to edge.
const DEFAULT_WINDOW_WIDTH: i32 = 900;
const DEFAULT_WINDOW_HEIGHT: i32 = 750;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        high_dpi: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::build_window_conf;

    #[test]
    fn titles_the_window_after_the_app() {
        assert_eq!(build_window_conf().window_title, "Athenaeum");
    }

    #[test]
    fn uses_the_chunk_sized_default_window() {
        let conf = build_window_conf();
        assert_eq!(conf.window_width, 900);
        assert_eq!(conf.window_height, 750);
        assert!(conf.high_dpi);
    }
}
