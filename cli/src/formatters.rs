use std::io::{self, Write};

use rehome_core::{Ad, Pager};
use serde_json::json;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::args::OutputFormat;

/// Renders one page of ads in the selected output format
pub struct AdListFormatter {
    output: OutputFormat,
}

impl AdListFormatter {
    pub fn new(output: OutputFormat) -> Self {
        AdListFormatter { output }
    }

    pub fn print_page<F: Clone + PartialEq>(&mut self, pager: &Pager<Ad, F>) -> io::Result<()> {
        match self.output {
            OutputFormat::Json => self.print_json(pager),
            OutputFormat::Plain => self.print_plain(pager),
            OutputFormat::Pretty => self.print_pretty(pager),
        }
    }

    fn print_json<F: Clone + PartialEq>(&self, pager: &Pager<Ad, F>) -> io::Result<()> {
        let value = json!({
            "ads": pager.items(),
            "totalAds": pager.total(),
            "page": pager.current_page(),
            "lastPage": pager.last_page(),
        });
        let rendered = serde_json::to_string_pretty(&value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(io::stdout(), "{rendered}")
    }

    fn print_plain<F: Clone + PartialEq>(&self, pager: &Pager<Ad, F>) -> io::Result<()> {
        let mut out = io::stdout();
        for (idx, ad) in pager.items().iter().enumerate() {
            writeln!(out, "{}", ad_line(idx, ad))?;
            writeln!(out, "   {}", ad.ad_content)?;
            writeln!(out, "   {}", contact_line(ad))?;
            if let Some(posted) = posted_line(ad) {
                writeln!(out, "   {posted}")?;
            }
            if let Some(image) = ad.image() {
                writeln!(out, "   image: {image}")?;
            }
        }
        if pager.items().is_empty() {
            writeln!(out, "No ads on this page.")?;
        }
        writeln!(out, "{}", pager.page_display())
    }

    fn print_pretty<F: Clone + PartialEq>(&self, pager: &Pager<Ad, F>) -> io::Result<()> {
        let mut out = StandardStream::stdout(ColorChoice::Auto);

        for (idx, ad) in pager.items().iter().enumerate() {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{:2}. {}", idx + 1, ad.pet_name)?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, " [{}]", ad.category)?;
            out.reset()?;
            writeln!(out, " {}, {}", ad.pet_gender, age_display(ad.pet_age))?;
            writeln!(out, "    {}", ad.ad_content)?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            writeln!(out, "    {}", contact_line(ad))?;
            out.reset()?;
            if let Some(posted) = posted_line(ad) {
                writeln!(out, "    {posted}")?;
            }
            if let Some(image) = ad.image() {
                writeln!(out, "    image: {image}")?;
            }
        }

        if pager.items().is_empty() {
            writeln!(out, "No ads on this page.")?;
        }

        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{}", pager.page_display())?;
        out.reset()
    }
}

fn ad_line(idx: usize, ad: &Ad) -> String {
    format!(
        "{:2}. {} [{}] {}, {}",
        idx + 1,
        ad.pet_name,
        ad.category,
        ad.pet_gender,
        age_display(ad.pet_age)
    )
}

fn contact_line(ad: &Ad) -> String {
    format!("{} <{}> {}", ad.display_name, ad.email, ad.phone)
}

fn posted_line(ad: &Ad) -> Option<String> {
    ad.created_at
        .map(|created| format!("posted {}", created.format("%Y-%m-%d")))
}

fn age_display(age: f64) -> String {
    if age == 1.0 {
        "1 year".to_string()
    } else if age.fract() == 0.0 {
        format!("{} years", age as i64)
    } else {
        format!("{age} years")
    }
}
