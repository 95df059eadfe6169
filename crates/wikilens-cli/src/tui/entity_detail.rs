use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use wikilens_core::NormalizedEntity;

use super::App;
use crate::sections::{language_count, section_rows, Section, SectionRow};

/// Render the tabbed detail view of the loaded entity.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let Some(entity) = &app.entity else {
        let msg = Paragraph::new("No entity loaded").style(Style::default().fg(Color::Red));
        frame.render_widget(msg, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Label and description
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Tab content
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    render_header(frame, app, entity, chunks[0]);
    render_tabs(frame, app, entity, chunks[1]);
    render_content(frame, app, entity, chunks[2]);
    render_help(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, entity: &NormalizedEntity, area: Rect) {
    let label = entity.preferred_label(&app.language).unwrap_or(&entity.id);
    let description = entity.preferred_description(&app.language).unwrap_or("");

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                label.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", entity.id), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(description.to_string()),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_tabs(frame: &mut Frame, app: &App, entity: &NormalizedEntity, area: Rect) {
    let titles: Vec<String> = Section::ALL
        .iter()
        .map(|section| format!("{} ({})", section.title(), tab_count(entity, *section)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, area);
}

fn render_content(frame: &mut Frame, app: &App, entity: &NormalizedEntity, area: Rect) {
    let content = Paragraph::new(detail_lines(entity, app.tab))
        .scroll((app.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(app.tab.title()));
    frame.render_widget(content, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help = match &app.status {
        Some(status) => Paragraph::new(format!("  {status}")).style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new(
            "  Tab/\u{2192} Next tab  \u{2190} Prev tab  1-5 Jump  \u{2191}\u{2193} Scroll  b Back  q Quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(help.block(Block::default().borders(Borders::ALL)), area);
}

fn tab_count(entity: &NormalizedEntity, section: Section) -> usize {
    match section {
        Section::Properties => entity.properties.basic.len(),
        Section::Identifiers => entity.properties.identifiers.len(),
        Section::Statements => entity.properties.statements.len(),
        Section::Links => entity.sitelinks.len(),
        Section::Languages => language_count(entity),
    }
}

/// Styled lines for one tab.
pub fn detail_lines(entity: &NormalizedEntity, section: Section) -> Vec<Line<'static>> {
    let rows = section_rows(entity, section);
    if rows.is_empty() {
        return vec![Line::from(Span::styled(
            format!("  {}", section.empty_message()),
            Style::default().fg(Color::Yellow),
        ))];
    }

    rows.into_iter()
        .map(|row| match row {
            SectionRow::Heading(heading) => Line::from(Span::styled(
                heading,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            SectionRow::Entry { key, value } => Line::from(vec![
                Span::styled(format!("  {:<32}", key), Style::default().fg(Color::Cyan)),
                Span::raw(value),
            ]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wikilens_core::normalize_bare_entity;

    fn entity() -> NormalizedEntity {
        normalize_bare_entity(&json!({
            "id": "Q1",
            "labels": {"en": {"language": "en", "value": "universe"}},
            "claims": {
                "P18": [{"mainsnak": {"datatype": "commonsMedia",
                    "datavalue": {"type": "string", "value": "Hubble ultra deep field.jpg"}}}]
            }
        }))
        .unwrap()
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_detail_lines_for_claims() {
        let lines = detail_lines(&entity(), Section::Properties);
        assert_eq!(lines.len(), 1);
        let line = text(&lines[0]);
        assert!(line.starts_with("  Image (P18)"));
        assert!(line.ends_with("Hubble ultra deep field.jpg"));
    }

    #[test]
    fn test_detail_lines_for_empty_tab() {
        let lines = detail_lines(&entity(), Section::Links);
        assert_eq!(text(&lines[0]), "  No sitelinks");
    }

    #[test]
    fn test_tab_counts() {
        let entity = entity();
        assert_eq!(tab_count(&entity, Section::Properties), 1);
        assert_eq!(tab_count(&entity, Section::Identifiers), 0);
        assert_eq!(tab_count(&entity, Section::Languages), 1);
    }
}
