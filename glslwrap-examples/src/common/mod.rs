use glfw::{Action, Key, WindowEvent};
use glslwrap_windowing::{WindowDim, WindowOpt};
use log::warn;

/// Window settings read from the command line: `[WIDTH HEIGHT [TITLE]]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Args {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

impl Args {
  pub fn parse(
    args: impl IntoIterator<Item = String>,
    width: u32,
    height: u32,
    title: &str,
  ) -> Self {
    let mut args = args.into_iter();
    let mut parsed = Args {
      width,
      height,
      title: title.to_owned(),
    };

    if let (Some(w), Some(h)) = (args.next(), args.next()) {
      match (w.parse(), h.parse()) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => {
          parsed.width = w;
          parsed.height = h;
        }

        _ => warn!(
          "invalid window size {}x{}; using {}x{}",
          w, h, width, height
        ),
      }
    }

    if let Some(title) = args.next() {
      parsed.title = title;
    }

    parsed
  }

  pub fn from_env(width: u32, height: u32, title: &str) -> Self {
    Self::parse(std::env::args().skip(1), width, height, title)
  }

  pub fn window_opt(&self) -> WindowOpt {
    WindowOpt::default().set_dim(WindowDim::Windowed {
      width: self.width,
      height: self.height,
    })
  }
}

/// Whether the event asks the demo to stop.
pub fn is_quit_event(event: &WindowEvent) -> bool {
  matches!(
    event,
    WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _)
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn defaults_without_arguments() {
    let parsed = Args::parse(args(&[]), 640, 480, "line");

    assert_eq!(parsed.width, 640);
    assert_eq!(parsed.height, 480);
    assert_eq!(parsed.title, "line");
  }

  #[test]
  fn size_and_title() {
    let parsed = Args::parse(args(&["800", "600", "hello"]), 640, 480, "line");

    assert_eq!(parsed.width, 800);
    assert_eq!(parsed.height, 600);
    assert_eq!(parsed.title, "hello");
  }

  #[test]
  fn invalid_size_keeps_defaults() {
    let parsed = Args::parse(args(&["wide", "0"]), 640, 480, "line");

    assert_eq!((parsed.width, parsed.height), (640, 480));
  }
}
