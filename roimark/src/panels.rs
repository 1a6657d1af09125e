use roimark_domain::{RmError, RmResult};

/// Accumulates emitted configuration lines verbatim for later bulk copy.
pub trait OutputPanel {
    fn add_line(&mut self, line: &str);
    fn reset(&mut self);
}

/// Groupwise echo of captured coordinates next to the canvas, one group per
/// annotation figure.
pub trait SidePanel {
    fn new_group(&mut self, title: &str);
    /// fails with [`RmError::MissingActiveGroup`](RmError::MissingActiveGroup)
    /// if no group is open
    fn append_current_group(&mut self, text: &str) -> RmResult<()>;
    fn end_group(&mut self);
    fn reset(&mut self);
}

/// In-memory output panel. A frontend would implement [`OutputPanel`] on its
/// own widget instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextOutput {
    lines: Vec<String>,
}
impl TextOutput {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn lines(&self) -> &Vec<String> {
        &self.lines
    }
    /// the configuration as consumed downstream, one annotation per line
    pub fn to_config(&self) -> String {
        self.lines.join("\n")
    }
}
impl OutputPanel for TextOutput {
    fn add_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
    fn reset(&mut self) {
        self.lines.clear();
    }
}

/// In-memory side panel keeping `(title, entries)` per group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordGroups {
    groups: Vec<(String, Vec<String>)>,
    has_open_group: bool,
}
impl CoordGroups {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn groups(&self) -> &Vec<(String, Vec<String>)> {
        &self.groups
    }
}
impl SidePanel for CoordGroups {
    fn new_group(&mut self, title: &str) {
        self.groups.push((title.to_string(), vec![]));
        self.has_open_group = true;
    }
    fn append_current_group(&mut self, text: &str) -> RmResult<()> {
        if !self.has_open_group {
            return Err(RmError::MissingActiveGroup(
                "no active group to append data".to_string(),
            ));
        }
        if let Some((_, entries)) = self.groups.last_mut() {
            entries.push(text.to_string());
        }
        Ok(())
    }
    fn end_group(&mut self) {
        self.has_open_group = false;
    }
    fn reset(&mut self) {
        self.groups.clear();
        self.has_open_group = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_panel() {
        let mut output = TextOutput::new();
        output.add_line("roi-P1=0;0;20;30;40;0;");
        output.add_line("line-crossing-P2=2;2;3;3;0;0;1;1;");
        assert_eq!(
            output.to_config(),
            "roi-P1=0;0;20;30;40;0;\nline-crossing-P2=2;2;3;3;0;0;1;1;"
        );
        output.reset();
        assert!(output.lines().is_empty());
    }

    #[test]
    fn test_side_panel_groups() {
        let mut panel = CoordGroups::new();
        assert!(matches!(
            panel.append_current_group("(0, 0)"),
            Err(RmError::MissingActiveGroup(_))
        ));
        panel.new_group("Polygon #1");
        panel.append_current_group("(0, 0)").unwrap();
        panel.append_current_group("(20, 30)").unwrap();
        panel.end_group();
        assert!(matches!(
            panel.append_current_group("(40, 0)"),
            Err(RmError::MissingActiveGroup(_))
        ));
        assert_eq!(panel.groups().len(), 1);
        assert_eq!(panel.groups()[0].0, "Polygon #1");
        assert_eq!(panel.groups()[0].1, vec!["(0, 0)", "(20, 30)"]);
        panel.reset();
        assert!(panel.groups().is_empty());
    }
}
