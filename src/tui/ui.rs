use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Gauge, List, ListItem, Paragraph,
    },
    Frame,
};

use crate::models::ScoredArea;
use crate::render::{display_positions, diverging_color};
use crate::scoring::ATTRIBUTE_LABELS;
use crate::tui::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(frame.size());

    draw_weight_panel(frame, app, columns[0]);
    draw_map_panel(frame, app, columns[1]);
}

fn draw_weight_panel(frame: &mut Frame, app: &App, area: Rect) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(std::iter::repeat(Constraint::Length(1)).take(ATTRIBUTE_LABELS.len()));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(6));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area);

    let title = Paragraph::new("Importance Index")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    for (i, ((_, weight), label)) in app
        .weights
        .entries()
        .iter()
        .zip(ATTRIBUTE_LABELS)
        .enumerate()
    {
        let selected = i == app.selected;
        let bar_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let marker = if selected { "> " } else { "  " };
        let gauge = Gauge::default()
            .gauge_style(bar_style)
            .ratio(weight.clamp(0.0, 1.0))
            .label(format!("{}{}: {:.2}", marker, label, weight));
        frame.render_widget(gauge, chunks[1 + i]);
    }

    let mut footer = vec![
        Line::from(vec![
            Span::styled("enter", key_style()),
            Span::raw(" update map | "),
            Span::styled("arrows", key_style()),
            Span::raw(" select/adjust"),
        ]),
        Line::from(vec![
            Span::styled("r", key_style()),
            Span::raw(" reset | "),
            Span::styled("q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ]),
        Line::from(format!("{} areas in working set", app.areas.len())),
    ];
    if let Some(error) = &app.error_message {
        footer.push(Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
        ]));
    }
    let help = Paragraph::new(footer)
        .block(Block::default().borders(Borders::ALL).title("Adjust Weights"));
    frame.render_widget(help, chunks[chunks.len() - 1]);
}

fn key_style() -> Style {
    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
}

fn draw_map_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(area);

    match &app.scored {
        Some(table) => {
            draw_choropleth(frame, table, chunks[0]);
            draw_ranking(frame, table, chunks[1]);
        }
        None => {
            let placeholder = Paragraph::new("Press Enter to update the map")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Importance Index by Area"));
            frame.render_widget(placeholder, chunks[0]);
        }
    }
}

fn draw_choropleth(frame: &mut Frame, table: &[ScoredArea], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Importance Index by Area (blue = low, red = high)");

    let Some((x_bounds, y_bounds)) = geometry_bounds(table) else {
        let placeholder = Paragraph::new("No geometry in working set")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let scores: Vec<f64> = table.iter().map(|a| a.score).collect();
    let positions = display_positions(&scores);

    let canvas = Canvas::default()
        .block(block)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (scored, position) in table.iter().zip(&positions) {
                let (r, g, b) = diverging_color(*position);
                let color = Color::Rgb(r, g, b);
                for ring in &scored.rings {
                    for segment in ring.windows(2) {
                        ctx.draw(&CanvasLine {
                            x1: segment[0].0,
                            y1: segment[0].1,
                            x2: segment[1].0,
                            y2: segment[1].1,
                            color,
                        });
                    }
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_ranking(frame: &mut Frame, table: &[ScoredArea], area: Rect) {
    let scores: Vec<f64> = table.iter().map(|a| a.score).collect();
    let positions = display_positions(&scores);

    let mut ranked: Vec<(&ScoredArea, f64)> =
        table.iter().zip(positions.into_iter()).collect();
    ranked.sort_by(|a, b| b.0.score.total_cmp(&a.0.score));

    let items: Vec<ListItem> = ranked
        .iter()
        .map(|(scored, position)| {
            let (r, g, b) = diverging_color(*position);
            let label = scored.name.as_deref().unwrap_or(&scored.id);
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(format!("{:<24}", label)),
                Span::styled(
                    format!("{:>8.4}", scored.score),
                    Style::default().fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Ranking"));
    frame.render_widget(list, area);
}

/// Bounding box over every ring in the table, padded slightly so outlines
/// do not touch the border.
fn geometry_bounds(table: &[ScoredArea]) -> Option<([f64; 2], [f64; 2])> {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for area in table {
        for ring in &area.rings {
            for (x, y) in ring {
                bounds = Some(match bounds {
                    None => (*x, *x, *y, *y),
                    Some((lo_x, hi_x, lo_y, hi_y)) => {
                        (lo_x.min(*x), hi_x.max(*x), lo_y.min(*y), hi_y.max(*y))
                    }
                });
            }
        }
    }
    let (lo_x, hi_x, lo_y, hi_y) = bounds?;
    let pad_x = ((hi_x - lo_x) * 0.05).max(1e-6);
    let pad_y = ((hi_y - lo_y) * 0.05).max(1e-6);
    Some(([lo_x - pad_x, hi_x + pad_x], [lo_y - pad_y, hi_y + pad_y]))
}
