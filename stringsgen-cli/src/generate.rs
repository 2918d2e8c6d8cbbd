use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use stringsgen::{BuildConfig, EnumBuilder, SkippedRecord};
use tracing::{debug, info};

use crate::path_glob::expand_input_globs;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub inputs: Vec<String>,
    /// Output file, single input only.
    pub output: Option<PathBuf>,
    /// Directory receiving `<file-stem>.swift` per input.
    pub output_dir: Option<PathBuf>,
    pub build: BuildConfig,
    /// Fail on unparsable records and on duplicate keys or member names.
    pub strict: bool,
}

/// Result of generating code for one input file.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub input: PathBuf,
    /// `None` when the source goes to stdout.
    pub output: Option<PathBuf>,
    pub source: String,
    pub entries: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// Parses one file on its own builder and renders it.
pub fn generate_one(
    input: &Path,
    config: &BuildConfig,
    strict: bool,
) -> Result<GeneratedFile, String> {
    let mut builder = EnumBuilder::new();
    let skipped = builder
        .parse_strings_file(input)
        .map_err(|e| format!("Error reading {}: {}", input.display(), e))?;

    if strict && !skipped.is_empty() {
        return Err(format!(
            "{}: {} record(s) could not be parsed (first at line {})",
            input.display(),
            skipped.len(),
            skipped[0].line
        ));
    }

    let source = if strict {
        builder
            .build_validated(config)
            .map_err(|e| format!("{}: {}", input.display(), e))?
    } else {
        builder.build_with(config)
    };

    debug!(
        input = %input.display(),
        entries = builder.len(),
        skipped = skipped.len(),
        "generated accessors"
    );

    Ok(GeneratedFile {
        input: input.to_path_buf(),
        output: None,
        source,
        entries: builder.len(),
        skipped,
    })
}

fn output_paths(
    inputs: &[PathBuf],
    options: &GenerateOptions,
) -> Result<Vec<Option<PathBuf>>, String> {
    if let Some(output) = &options.output {
        if inputs.len() > 1 {
            return Err(format!(
                "--output takes a single input, got {}; use --output-dir instead",
                inputs.len()
            ));
        }
        return Ok(vec![Some(output.clone())]);
    }

    let Some(dir) = &options.output_dir else {
        if inputs.len() > 1 {
            return Err(format!(
                "{} inputs need --output-dir (or `output_dir` in the config file)",
                inputs.len()
            ));
        }
        return Ok(vec![None; inputs.len()]);
    };

    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(inputs.len());
    for input in inputs {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| format!("Cannot derive an output name from {}", input.display()))?;
        let path = dir.join(format!("{}.swift", stem));
        if let Some(first) = claimed.insert(path.clone(), input) {
            return Err(format!(
                "{} and {} would both be written to {}",
                first.display(),
                input.display(),
                path.display()
            ));
        }
        paths.push(Some(path));
    }
    Ok(paths)
}

/// Generates every input in parallel, one builder per file, and writes the results.
///
/// Nothing is written when any input fails.
pub fn run_generate(options: &GenerateOptions) -> Result<Vec<GeneratedFile>, String> {
    let inputs = expand_input_globs(&options.inputs)?;
    let outputs = output_paths(&inputs, options)?;

    let results = inputs
        .par_iter()
        .map(|input| generate_one(input, &options.build, options.strict))
        .collect::<Vec<_>>();

    let errors = results
        .iter()
        .filter_map(|r| r.as_ref().err().cloned())
        .collect::<Vec<_>>();
    if !errors.is_empty() {
        return Err(errors.join("\n"));
    }

    let mut files = Vec::with_capacity(results.len());
    for (result, output) in results.into_iter().zip(outputs) {
        let mut file = result?;
        if let Some(path) = &output {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating {}: {}", parent.display(), e))?;
            }
            fs::write(path, &file.source)
                .map_err(|e| format!("Error writing {}: {}", path.display(), e))?;
            info!(output = %path.display(), "wrote generated source");
        }
        file.output = output;
        files.push(file);
    }
    Ok(files)
}

/// Runs `generate` and reports on stdout.
///
/// Without an output file the generated source itself is the only thing
/// printed, so it can be piped.
pub fn run_generate_command(options: GenerateOptions) -> Result<(), String> {
    let files = run_generate(&options)?;
    for file in &files {
        match &file.output {
            Some(path) => {
                println!(
                    "✅ {} -> {} ({} entries)",
                    file.input.display(),
                    path.display(),
                    file.entries
                );
                if !file.skipped.is_empty() {
                    println!("   ⚠️  {} record(s) skipped", file.skipped.len());
                }
            }
            None => print!("{}", file.source),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stringsgen::Indentation;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_generate_single_file_to_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(
            temp_dir.path(),
            "Localizable.strings",
            "\"Greetings\" = \"Hello %@\";\n",
        );
        let output = temp_dir.path().join("out/L10n.swift");

        let files = run_generate(&GenerateOptions {
            inputs: vec![input.display().to_string()],
            output: Some(output.clone()),
            build: BuildConfig::default().with_indentation(Indentation::Tab),
            ..GenerateOptions::default()
        })
        .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].output.as_ref(), Some(&output));
        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, files[0].source);
        assert!(written.contains("\tcase Greetings(String)\n"));
    }

    #[test]
    fn test_generate_output_dir_uses_file_stems() {
        let temp_dir = TempDir::new().unwrap();
        let a = write(temp_dir.path(), "Localizable.strings", "\"A\" = \"a\";");
        let b = write(temp_dir.path(), "InfoPlist.strings", "\"B\" = \"%d\";");
        let out_dir = temp_dir.path().join("Generated");

        let files = run_generate(&GenerateOptions {
            inputs: vec![a.display().to_string(), b.display().to_string()],
            output_dir: Some(out_dir.clone()),
            ..GenerateOptions::default()
        })
        .unwrap();

        assert_eq!(files.len(), 2);
        let localizable = fs::read_to_string(out_dir.join("Localizable.swift")).unwrap();
        assert!(localizable.contains("case A\n"));
        let info_plist = fs::read_to_string(out_dir.join("InfoPlist.swift")).unwrap();
        assert!(info_plist.contains("case B(Int)\n"));
    }

    #[test]
    fn test_output_name_collision_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let en = write(temp_dir.path(), "en.lproj/Localizable.strings", "\"A\" = \"a\";");
        let fr = write(temp_dir.path(), "fr.lproj/Localizable.strings", "\"A\" = \"a\";");

        let err = run_generate(&GenerateOptions {
            inputs: vec![en.display().to_string(), fr.display().to_string()],
            output_dir: Some(temp_dir.path().join("Generated")),
            ..GenerateOptions::default()
        })
        .unwrap_err();
        assert!(err.contains("would both be written to"));
        assert!(!temp_dir.path().join("Generated").exists());
    }

    #[test]
    fn test_multiple_inputs_without_output_dir_is_rejected() {
        let err = run_generate(&GenerateOptions {
            inputs: vec!["a.strings".to_string(), "b.strings".to_string()],
            ..GenerateOptions::default()
        })
        .unwrap_err();
        assert!(err.contains("need --output-dir"));
    }

    #[test]
    fn test_missing_input_reports_read_error() {
        let err = run_generate(&GenerateOptions {
            inputs: vec!["/definitely/not/here.strings".to_string()],
            ..GenerateOptions::default()
        })
        .unwrap_err();
        assert!(err.contains("Error reading /definitely/not/here.strings"));
    }

    #[test]
    fn test_strict_mode() {
        let temp_dir = TempDir::new().unwrap();
        let skipped = write(temp_dir.path(), "skipped.strings", "\"A\" = \"a\";\nnonsense\n");
        let duplicated = write(temp_dir.path(), "dup.strings", "\"A\" = \"a\";\n\"A\" = \"b\";\n");

        let lenient = generate_one(&skipped, &BuildConfig::default(), false).unwrap();
        assert_eq!(lenient.skipped.len(), 1);

        let err = generate_one(&skipped, &BuildConfig::default(), true).unwrap_err();
        assert!(err.contains("1 record(s) could not be parsed (first at line 2)"));

        let lenient = generate_one(&duplicated, &BuildConfig::default(), false).unwrap();
        assert_eq!(lenient.source.matches("case A").count(), 1);

        let err = generate_one(&duplicated, &BuildConfig::default(), true).unwrap_err();
        assert!(err.contains("duplicate key `A`"));
    }
}
