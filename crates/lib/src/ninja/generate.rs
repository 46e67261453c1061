use std::io::{self, Write};
use std::path::Path;

use crate::consts::APP_NAME;
use crate::env::FinalEnv;
use crate::files::{ComponentKind, Components, SourceLang};

use super::writer::NinjaWriter;

const RULES: [(&str, &str, Option<&str>); 5] = [
  ("cc", "$cc -c -o $out $in -MD -MF $out.d $cflags", Some("$out.d")),
  ("cxx", "$cxx -c -o $out $in -MD -MF $out.d $cxxflags", Some("$out.d")),
  ("as", "$as -o $out $in $asflags", None),
  ("ar", "$ar $arflags $out $in", None),
  ("ld", "$ld -o $out $in $ldflags", None),
];

fn path_str(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}

/// Write the build graph for `components` under `env`.
///
/// Every component gets one compile edge per object, then an archive edge
/// (libraries) or a link edge over its objects and `libs` (executables). A
/// phony `all` edge over every artifact is the default target.
pub fn write_build_graph<W: Write>(out: W, components: &Components, env: &FinalEnv) -> io::Result<()> {
  let mut writer = NinjaWriter::new(out);

  writer.comment(&format!("Generated by {}", APP_NAME))?;
  writer.newline()?;

  writer.comment("Environment:")?;
  for (name, value) in env.variables() {
    writer.variable(&name, &value)?;
  }
  writer.newline()?;

  writer.comment("Rules:")?;
  for (name, command, depfile) in RULES {
    writer.rule(name, command, depfile)?;
  }
  writer.newline()?;

  writer.comment("Build:")?;
  let mut all = Vec::with_capacity(components.len());
  for (id, component) in components.iter() {
    writer.comment(&format!("Project: {}", id))?;

    let mut objects = Vec::with_capacity(component.objs.len());
    for (obj, src) in &component.objs {
      let obj = path_str(obj);
      // Sources are filtered by extension at scan time.
      if let Some(lang) = SourceLang::from_path(src) {
        writer.build(&[&obj], lang.rule(), &[&path_str(src)])?;
      }
      objects.push(obj);
    }
    writer.newline()?;

    let output = path_str(&component.out);
    let mut inputs: Vec<&str> = objects.iter().map(String::as_str).collect();
    let libs: Vec<String> = component.libs.iter().map(|lib| path_str(lib)).collect();
    let rule = match component.kind {
      ComponentKind::Lib => "ar",
      ComponentKind::Exe => {
        inputs.extend(libs.iter().map(String::as_str));
        "ld"
      }
    };
    writer.build(&[&output], rule, &inputs)?;
    writer.newline()?;

    all.push(output);
  }

  writer.comment("Phony:")?;
  let all: Vec<&str> = all.iter().map(String::as_str).collect();
  writer.build(&["all"], "phony", &all)?;
  writer.default(&["all"])?;

  writer.into_inner().flush()
}
