/// Inline terminal display of a rendered figure via ratatui-image.
///
/// Blocking: the viewer holds the terminal until a key is pressed. When the
/// terminal has no image protocol (headless or plain emulator), showing a
/// figure is a logged no-op rather than an error.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::StatefulImage;

use crate::error::{FigureError, FigureResult};
use crate::plot::types::RenderedFigure;

/// Show a figure inline until a key is pressed.
pub fn show_figure(figure: &RenderedFigure) -> FigureResult<()> {
    // Query terminal for image protocol support BEFORE entering alternate screen
    let picker = match Picker::from_query_stdio() {
        Ok(p) => p,
        Err(_) => {
            tracing::warn!("terminal has no image protocol (Kitty/iTerm2/Sixel), skipping display");
            return Ok(());
        }
    };

    let dyn_image = image::load_from_memory(&figure.png_bytes)
        .map_err(|e| FigureError::render(format!("figure decode: {}", e)))?;
    let mut protocol = picker.new_resize_protocol(dyn_image);

    enable_raw_mode().map_err(|e| FigureError::io(format!("raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| FigureError::io(format!("alt screen: {}", e)))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| FigureError::io(format!("terminal: {}", e)))?;

    let result = run_viewer(&mut terminal, &mut protocol);

    // Restore terminal even if the viewer failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn run_viewer(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    protocol: &mut StatefulProtocol,
) -> FigureResult<()> {
    loop {
        terminal
            .draw(|frame| {
                let layout =
                    Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(frame.area());
                frame.render_stateful_widget(StatefulImage::default(), layout[0], protocol);
                frame.render_widget(Paragraph::new(" press any key to close"), layout[1]);
            })
            .map_err(|e| FigureError::io(format!("draw: {}", e)))?;

        if event::poll(Duration::from_millis(100))
            .map_err(|e| FigureError::io(format!("poll: {}", e)))?
        {
            if let Event::Key(_) = event::read().map_err(|e| FigureError::io(format!("read: {}", e)))? {
                break;
            }
        }
    }
    Ok(())
}
