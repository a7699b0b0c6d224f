//! Common test utilities for benchsetup integration tests

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// The fixed directory plan of the default toolchain
#[allow(dead_code)]
pub const PLAN_DIRS: [&str; 4] = [
    "VCAST_UT",
    "VectorCAST_patch_for_Tasking_Tricore_TC297TA_T32_Simulator",
    "SourceCode",
    "Master_CFG",
];

#[allow(dead_code)]
pub const LAUNCH_ARCHIVE: &str = "Launch_VC_Tricore_AURIX_TC23x_t32sim.zip";
#[allow(dead_code)]
pub const SOURCE_ARCHIVE: &str = "SourceCode.zip";
#[allow(dead_code)]
pub const CONFIG_FILE: &str = "CCAST_.cfg";

/// Configuration file bytes used by fixtures
#[allow(dead_code)]
pub const CONFIG_BYTES: &[u8] = b"C_COMPILER_TAG: TRICORE_TASKING\nC_EDG_FLAGS: --tc297\n";

/// A scratch destination plus a fake shared source location
#[allow(dead_code)]
pub struct TestBench {
    pub temp: TempDir,
    /// Destination root handed to the tool
    pub dest: PathBuf,
    /// Fake shared source location
    pub source: PathBuf,
}

#[allow(dead_code)]
impl TestBench {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let dest = temp.path().join("work");
        let source = temp.path().join("share");
        std::fs::create_dir_all(&dest).expect("Failed to create destination");
        std::fs::create_dir_all(&source).expect("Failed to create source dir");
        Self { temp, dest, source }
    }

    /// Write a zip with the given entries into the shared source location
    pub fn write_zip(&self, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = self.source.join(name);
        write_zip_at(&path, entries);
        path
    }

    /// Populate the shared source location with all three valid artifacts
    pub fn populate_source(&self) {
        self.write_zip(
            LAUNCH_ARCHIVE,
            &[
                ("t32sim/launch.cmm", b"; launch script".as_slice()),
                ("t32sim/config.t32", b"PBI=SIM".as_slice()),
            ],
        );
        self.write_zip(
            SOURCE_ARCHIVE,
            &[
                ("module_a.c", b"int module_a;".as_slice()),
                ("include/module_a.h", b"extern int module_a;".as_slice()),
            ],
        );
        std::fs::write(self.source.join(CONFIG_FILE), CONFIG_BYTES)
            .expect("Failed to write config fixture");
    }

    /// Project root for a given project name
    pub fn project(&self, name: &str) -> PathBuf {
        self.dest.join(name)
    }
}

impl Default for TestBench {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a zip file with the given entries
#[allow(dead_code)]
pub fn write_zip_at(path: &Path, entries: &[(&str, &[u8])]) {
    let file = std::fs::File::create(path).expect("Failed to create zip file");
    let mut zip = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in entries {
        zip.start_file(name.to_string(), options)
            .expect("Failed to start zip entry");
        zip.write_all(content).expect("Failed to write zip entry");
    }
    zip.finish().expect("Failed to finish zip");
}
