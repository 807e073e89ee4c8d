//! Keyboard input dispatch: global keys, then the focused control.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global keys.
    match key.code {
        KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Tab => {
            app.focus = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus.prev()
            } else {
                app.focus.next()
            };
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::Enter => {
            app.request_run();
            return;
        }
        _ => {}
    }

    // 2. Focused control. The path field takes every printable key, so `g`
    //    only generates a sample from the other controls.
    match app.focus {
        Focus::Path => handle_path_key(app, key),
        Focus::Seed => handle_seed_key(app, key),
        Focus::Window => handle_window_key(app, key),
        Focus::Version => handle_version_key(app, key),
    }
}

fn handle_path_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.form.path.push(c),
        KeyCode::Backspace => {
            app.form.path.pop();
        }
        _ => {}
    }
}

fn handle_seed_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(d) = c.to_digit(10) {
                app.form.push_seed_digit(d);
            }
        }
        KeyCode::Backspace => app.form.pop_seed_digit(),
        KeyCode::Char('+') | KeyCode::Up | KeyCode::Right => app.form.step_seed(1),
        KeyCode::Char('-') | KeyCode::Down | KeyCode::Left => app.form.step_seed(-1),
        KeyCode::Char('g') => app.request_sample(),
        _ => {}
    }
}

fn handle_window_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Right | KeyCode::Up => {
            app.form.step_window(1)
        }
        KeyCode::Char('h') | KeyCode::Char('-') | KeyCode::Left | KeyCode::Down => {
            app.form.step_window(-1)
        }
        KeyCode::PageUp => app.form.step_window(10),
        KeyCode::PageDown => app.form.step_window(-10),
        KeyCode::Char('g') => app.request_sample(),
        _ => {}
    }
}

fn handle_version_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ')
        | KeyCode::Char('h')
        | KeyCode::Char('l')
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Up
        | KeyCode::Down => app.form.version = app.form.version.toggle(),
        KeyCode::Char('g') => app.request_sample(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{test_app, VersionChoice};
    use crate::worker::WorkerCommand;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let (mut app, _rx) = test_app();
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.running);

        let (mut app, _rx) = test_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn plain_c_is_typed_into_path() {
        let (mut app, _rx) = test_app();
        for c in "c.csv".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.form.path, "c.cs");
        assert!(app.running);
    }

    #[test]
    fn tab_moves_focus_both_ways() {
        let (mut app, _rx) = test_app();
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Seed);
        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Path);
    }

    #[test]
    fn window_slider_keys() {
        let (mut app, _rx) = test_app();
        app.focus = Focus::Window;
        handle_key(&mut app, press(KeyCode::Right));
        handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.form.window, 7);
        handle_key(&mut app, press(KeyCode::PageDown));
        assert_eq!(app.form.window, 1);
    }

    #[test]
    fn seed_keys_edit_value() {
        let (mut app, _rx) = test_app();
        app.focus = Focus::Seed;
        handle_key(&mut app, press(KeyCode::Backspace));
        handle_key(&mut app, press(KeyCode::Char('1')));
        handle_key(&mut app, press(KeyCode::Char('+')));
        assert_eq!(app.form.seed, 42);
    }

    #[test]
    fn version_toggles() {
        let (mut app, _rx) = test_app();
        app.focus = Focus::Version;
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert_eq!(app.form.version, VersionChoice::V2Beta);
    }

    #[test]
    fn g_requests_sample_outside_path_field() {
        let (mut app, rx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert!(rx.try_recv().is_err());
        assert_eq!(app.form.path, "g");

        app.focus = Focus::Window;
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert!(matches!(
            rx.try_recv().unwrap(),
            WorkerCommand::GenerateSample { seed: 42, .. }
        ));
    }

    #[test]
    fn enter_starts_run() {
        let (mut app, rx) = test_app();
        app.form.path = "data.csv".into();
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(matches!(rx.try_recv().unwrap(), WorkerCommand::Run { .. }));
    }
}
