// Add-track form - four text fields typed into one character at a time
// Stays filled in after a rejected submit so the user can fix the blank field

use crate::audio::TrackDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Artist,
    Source,
    Cover,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Artist,
        FormField::Source,
        FormField::Cover,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Artist => "Artist",
            FormField::Source => "Audio file",
            FormField::Cover => "Cover (optional)",
        }
    }

    fn position(self) -> usize {
        match self {
            FormField::Title => 0,
            FormField::Artist => 1,
            FormField::Source => 2,
            FormField::Cover => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub struct AddForm {
    open: bool,
    focus: FormField,
    values: [String; 4],
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            open: false,
            focus: FormField::Title,
            values: Default::default(),
        }
    }
}

impl AddForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the form. Whatever was typed is kept for next time.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.position()]
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn push(&mut self, c: char) {
        self.values[self.focus.position()].push(c);
    }

    pub fn pop(&mut self) {
        self.values[self.focus.position()].pop();
    }

    pub fn to_draft(&self) -> TrackDraft {
        TrackDraft::new(
            self.value(FormField::Title),
            self.value(FormField::Artist),
            self.value(FormField::Source),
            self.value(FormField::Cover),
        )
    }

    /// Reset after a successful submit.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut AddForm, text: &str) {
        for c in text.chars() {
            form.push(c);
        }
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut form = AddForm::new();
        assert_eq!(form.focus(), FormField::Title);
        form.focus_previous();
        assert_eq!(form.focus(), FormField::Cover);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), FormField::Artist);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = AddForm::new();
        type_str(&mut form, "Yellow");
        form.focus_next();
        type_str(&mut form, "Coldplayy");
        form.pop();
        form.focus_next();
        type_str(&mut form, "music/yellow.mp3");

        assert_eq!(
            form.to_draft(),
            TrackDraft::new("Yellow", "Coldplay", "music/yellow.mp3", "")
        );
    }

    #[test]
    fn test_close_keeps_input_clear_resets() {
        let mut form = AddForm::new();
        form.open();
        type_str(&mut form, "T");
        form.focus_next();

        form.close();
        assert!(!form.is_open());
        assert_eq!(form.value(FormField::Title), "T");

        form.open();
        form.clear();
        assert!(!form.is_open());
        assert_eq!(form.value(FormField::Title), "");
        assert_eq!(form.focus(), FormField::Title);
    }
}
