//! Panel recorder for tests

use std::collections::HashMap;

use super::PanelUi;

/// Records what was drawn, answers from a script
#[derive(Default)]
pub struct ScriptedUi {
    pub log: Vec<String>,
    /// Buttons reported as clicked
    pub clicks: Vec<&'static str>,
    pub ints: HashMap<&'static str, i32>,
    /// Text committed into a field, by label
    pub texts: HashMap<&'static str, &'static str>,
    pub combo_pick: Option<usize>,
    pub depth: i32,
}

impl PanelUi for ScriptedUi {
    fn text(&mut self, text: &str) {
        self.log.push(format!("text:{}", text));
    }

    fn combo(&mut self, label: &str, selected: &mut usize, items: &[&str]) -> bool {
        self.log.push(format!("combo:{}:{}", label, items[*selected]));
        match self.combo_pick {
            Some(i) if i != *selected => {
                *selected = i;
                true
            }
            _ => false,
        }
    }

    fn group_begin(&mut self, label: Option<&str>) {
        self.depth += 1;
        self.log.push(format!("group:{}", label.unwrap_or("")));
    }

    fn group_end(&mut self) {
        self.depth -= 1;
        self.log.push("end".to_string());
    }

    fn row_begin(&mut self, columns: usize) {
        self.log.push(format!("row:{}", columns));
    }

    fn row_end(&mut self) {
        self.log.push("row_end".to_string());
    }

    fn button(&mut self, label: &str, _width: f32) -> bool {
        self.log.push(format!("button:{}", label));
        self.clicks.iter().any(|c| *c == label)
    }

    fn input_int(&mut self, label: &str, value: &mut i32) -> bool {
        self.log.push(format!("int:{}={}", label, value));
        match self.ints.get(label) {
            Some(v) if *v != *value => {
                *value = *v;
                true
            }
            _ => false,
        }
    }

    fn input_text(&mut self, label: &str, value: &mut String) -> bool {
        self.log.push(format!("text_input:{}={}", label, value));
        match self.texts.get(label) {
            Some(v) if *v != value.as_str() => {
                *value = v.to_string();
                true
            }
            _ => false,
        }
    }
}
