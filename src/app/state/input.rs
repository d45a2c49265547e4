use super::*;

pub(crate) fn is_search_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, ' ' | '-' | '\'' | '\u{2019}' | ',' | '.')
}

impl AppState {
    pub(crate) async fn handle_input(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            self.handle_key_press(key, tx).await?;
        }
        Ok(())
    }

    pub(crate) async fn handle_key_press(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        if matches!(key.code, KeyCode::Char('c' | 'C'))
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }
        if self.search_open {
            self.handle_search_key(key, tx);
            return Ok(());
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => tx.send(AppEvent::Quit).await?,
            KeyCode::Char('/' | 's') => {
                self.search_open = true;
                self.search_query.clear();
            }
            KeyCode::Char('g') => {
                self.start_run(RunRequest::CurrentPosition, tx);
            }
            KeyCode::Char('r') => {
                if let Some(query) = self.selected_location.clone() {
                    self.start_run(RunRequest::Query(query), tx);
                }
            }
            KeyCode::Char('x') => self.dismiss_error(),
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) {
        match key.code {
            KeyCode::Esc => {
                self.search_open = false;
                self.search_query.clear();
            }
            KeyCode::Enter => {
                let query = std::mem::take(&mut self.search_query);
                self.search_open = false;
                self.start_run(RunRequest::Query(LocationQuery::SearchText(query)), tx);
            }
            KeyCode::Backspace => {
                self.search_query.pop();
            }
            KeyCode::Char(ch) if is_search_char(ch) => self.search_query.push(ch),
            _ => {}
        }
    }
}
