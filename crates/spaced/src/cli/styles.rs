use console::Style;

pub fn info() -> Style {
    Style::new().dim()
}

pub fn success() -> Style {
    Style::new().green()
}

pub fn warning() -> Style {
    Style::new().yellow()
}

pub fn item() -> Style {
    Style::new().bold()
}

pub fn interval() -> Style {
    Style::new().cyan()
}

/// Color a mastery percentage by band.
pub fn mastery(percentage: f64) -> Style {
    if percentage >= 80.0 {
        Style::new().green()
    } else if percentage >= 50.0 {
        Style::new().yellow()
    } else {
        Style::new().red()
    }
}
