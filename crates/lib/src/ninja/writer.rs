use std::io::{self, Write};

/// Escape a path for use in a build edge: `$`, space and `:` are significant there.
pub fn escape_path(path: &str) -> String {
  let mut escaped = String::with_capacity(path.len());
  for ch in path.chars() {
    match ch {
      '$' => escaped.push_str("$$"),
      ' ' => escaped.push_str("$ "),
      ':' => escaped.push_str("$:"),
      _ => escaped.push(ch),
    }
  }
  escaped
}

/// Escape a variable value: `$` would start a variable reference and a newline would end the line.
pub fn escape_value(value: &str) -> String {
  value.replace('$', "$$").replace('\n', "$\n")
}

/// Line-oriented writer for the ninja file format.
pub struct NinjaWriter<W: Write> {
  out: W,
}

impl<W: Write> NinjaWriter<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn comment(&mut self, text: &str) -> io::Result<()> {
    writeln!(self.out, "# {}", text)
  }

  pub fn newline(&mut self) -> io::Result<()> {
    writeln!(self.out)
  }

  /// A top-level variable. The value is escaped here.
  pub fn variable(&mut self, name: &str, value: &str) -> io::Result<()> {
    writeln!(self.out, "{} = {}", name, escape_value(value))
  }

  pub fn rule(&mut self, name: &str, command: &str, depfile: Option<&str>) -> io::Result<()> {
    writeln!(self.out, "rule {}", name)?;
    writeln!(self.out, "  command = {}", command)?;
    if let Some(depfile) = depfile {
      writeln!(self.out, "  depfile = {}", depfile)?;
    }
    Ok(())
  }

  /// A build edge. Outputs and inputs are escaped here.
  pub fn build(&mut self, outputs: &[&str], rule: &str, inputs: &[&str]) -> io::Result<()> {
    let outputs: Vec<String> = outputs.iter().map(|p| escape_path(p)).collect();
    let mut line = format!("build {}: {}", outputs.join(" "), rule);
    for input in inputs {
      line.push(' ');
      line.push_str(&escape_path(input));
    }
    writeln!(self.out, "{}", line)
  }

  pub fn default(&mut self, targets: &[&str]) -> io::Result<()> {
    let targets: Vec<String> = targets.iter().map(|p| escape_path(p)).collect();
    writeln!(self.out, "default {}", targets.join(" "))
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}
