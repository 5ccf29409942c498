//! A MODFLOW model: its packages, the name file, and running the simulator.
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info, warn};

use crate::config::{RunConfig, Version};
use crate::error::{ModflowError, Result};
use crate::packages::{DataFile, Discretization, ModelContext, Package, PackageKind};

/// Unit of the listing file.
const LIST_UNIT: u32 = 2;

/// Lines of simulator output kept in an [`ModflowError::AbnormalTermination`].
const TAIL_LINES: usize = 20;

/// What came back from one simulator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The simulator exited and reported normal termination.
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl RunReport {
    /// Turn an unsuccessful run into an error.
    pub fn check(self) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        let skip = self.stdout.len().saturating_sub(TAIL_LINES);
        Err(ModflowError::AbnormalTermination {
            status: self.status,
            tail: self.stdout[skip..].to_vec(),
        })
    }
}

fn normal_termination(stdout: &[String]) -> bool {
    stdout
        .iter()
        .any(|l| l.trim().to_ascii_lowercase().starts_with("normal termination"))
}

/// An in-memory MODFLOW model.
///
/// Adding a package of a kind the model already has replaces it, so a scenario can be changed
/// and re-run without building the model again.
///
/// ```no_run
/// use modflow_kit::{Model, Version, Grid, Discretization, Basic, LayerProperty, FlowProperties,
///     Pcg, OutputControl};
///
/// let grid = Grid::uniform(1, 1, 201, 10.0, 1.0, 50.0, 0.0).expect("grid");
/// let mut model = Model::new("gwexample", Version::Mf2005).with_workspace("runs");
/// model.set_discretization(Discretization::steady(grid));
/// model.add(Basic::all_active(20.0)).expect("bas");
/// model.add(LayerProperty::new(FlowProperties::new(10.0, 1.0).with_laytyp(1))).expect("lpf");
/// model.add(Pcg::default()).expect("pcg");
/// model.add(OutputControl::default()).expect("oc");
/// model.write_input().expect("input files");
/// let report = model.run().expect("launch");
/// assert!(report.success);
/// ```
#[derive(Debug)]
pub struct Model {
    name: String,
    version: Version,
    workspace: PathBuf,
    exe: PathBuf,
    silent: bool,
    dis: Option<Discretization>,
    packages: BTreeMap<PackageKind, Box<dyn Package>>,
}

impl Model {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Model {
            name: name.into(),
            version,
            workspace: PathBuf::from("."),
            exe: version.default_exe(),
            silent: false,
            dis: None,
            packages: BTreeMap::new(),
        }
    }

    pub fn with_config(name: impl Into<String>, version: Version, config: &RunConfig) -> Self {
        Model::new(name, version)
            .with_workspace(config.workspace())
            .with_exe(config.exe_for(version))
            .silent(config.silent)
    }

    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = workspace.into();
        self
    }

    pub fn with_exe(mut self, exe: impl Into<PathBuf>) -> Self {
        self.exe = exe.into();
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// Path of a file in the model workspace.
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.workspace.join(file_name)
    }

    pub fn name_file(&self) -> PathBuf {
        self.path(&format!("{}.nam", self.name))
    }

    pub fn set_discretization(&mut self, dis: Discretization) -> Option<Discretization> {
        self.dis.replace(dis)
    }

    pub fn discretization(&self) -> Option<&Discretization> {
        self.dis.as_ref()
    }

    /// Add a package, returning the one of the same kind it replaces.
    ///
    /// The discretization is set with [`Model::set_discretization`].
    pub fn add(&mut self, package: impl Package + 'static) -> Result<Option<Box<dyn Package>>> {
        let kind = package.kind();
        if kind == PackageKind::Dis {
            return Err(ModflowError::Config(
                "the discretization is set with set_discretization".into(),
            ));
        }
        Ok(self.packages.insert(kind, Box::new(package)))
    }

    pub fn remove(&mut self, kind: PackageKind) -> Option<Box<dyn Package>> {
        self.packages.remove(&kind)
    }

    pub fn has(&self, kind: PackageKind) -> bool {
        (kind == PackageKind::Dis && self.dis.is_some()) || self.packages.contains_key(&kind)
    }

    pub fn package_kinds(&self) -> Vec<PackageKind> {
        self.dis
            .iter()
            .map(|_| PackageKind::Dis)
            .chain(self.packages.keys().copied())
            .collect()
    }

    pub fn context(&self) -> Result<ModelContext<'_>> {
        let dis = self
            .dis
            .as_ref()
            .ok_or_else(|| ModflowError::Config(format!("model {} has no discretization", self.name)))?;
        Ok(ModelContext {
            name: &self.name,
            version: self.version,
            grid: &dis.grid,
            periods: &dis.periods,
        })
    }

    fn all_packages(&self) -> Vec<&dyn Package> {
        self.dis
            .iter()
            .map(|d| d as &dyn Package)
            .chain(self.packages.values().map(|p| &**p))
            .collect()
    }

    /// Check the model as a whole and every package in it.
    pub fn validate(&self) -> Result<()> {
        let ctx = self.context()?;
        if !self.packages.contains_key(&PackageKind::Bas6) {
            return Err(ModflowError::Config(format!("model {} has no BAS6 package", self.name)));
        }
        if self.packages.contains_key(&PackageKind::Lpf) && self.packages.contains_key(&PackageKind::Upw) {
            return Err(ModflowError::Config("LPF and UPW cannot be used together".into()));
        }
        if self.version == Version::Mf2005 {
            if let Some(kind) = self.packages.keys().find(|k| k.requires_nwt()) {
                return Err(ModflowError::Config(format!(
                    "{} requires MODFLOW-NWT",
                    kind.ftype()
                )));
            }
        }
        for package in self.all_packages() {
            package.validate(&ctx)?;
        }
        self.output_files().map(|_| ())
    }

    /// Output files named by the packages, one per unit, ordered by unit.
    pub fn output_files(&self) -> Result<Vec<DataFile>> {
        let mut units: BTreeMap<u32, String> = BTreeMap::new();
        units.insert(LIST_UNIT, "LIST".to_string());
        for package in self.all_packages() {
            if let Some(other) = units.insert(package.unit(), package.kind().ftype().to_string()) {
                return Err(ModflowError::Config(format!(
                    "{} and {} both use unit {}",
                    other,
                    package.kind().ftype(),
                    package.unit()
                )));
            }
        }

        let mut files: BTreeMap<u32, DataFile> = BTreeMap::new();
        for file in self.all_packages().iter().flat_map(|p| p.output_files(&self.name)) {
            if let Some(owner) = units.get(&file.unit) {
                return Err(ModflowError::Config(format!(
                    "output file {} uses unit {} which belongs to {}",
                    file.file_name, file.unit, owner
                )));
            }
            match files.get(&file.unit) {
                Some(existing) if *existing != file => {
                    return Err(ModflowError::Config(format!(
                        "unit {} is used for both {} and {}",
                        file.unit, existing.file_name, file.file_name
                    )));
                }
                Some(_) => {}
                None => {
                    files.insert(file.unit, file);
                }
            }
        }
        Ok(files.into_values().collect())
    }

    fn write_name_file(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "# Name file for MODFLOW, generated by modflow-kit")?;
        writeln!(out, "LIST {} {}.list", LIST_UNIT, self.name)?;
        for package in self.all_packages() {
            writeln!(
                out,
                "{} {} {}",
                package.kind().ftype(),
                package.unit(),
                package.file_name(&self.name)
            )?;
        }
        for file in self.output_files()? {
            if file.binary {
                writeln!(out, "DATA(BINARY) {} {} REPLACE", file.unit, file.file_name)?;
            } else {
                writeln!(out, "DATA {} {}", file.unit, file.file_name)?;
            }
        }
        Ok(())
    }

    fn write_file(
        &self,
        file_name: &str,
        write: impl FnOnce(&mut dyn Write) -> Result<()>,
    ) -> Result<PathBuf> {
        let path = self.path(file_name);
        debug!("writing {}", path.display());
        let mut out = BufWriter::new(File::create(&path)?);
        {
            let out: &mut dyn Write = &mut out;
            write(out)?;
        }
        out.flush()?;
        Ok(path)
    }

    /// Validate the model and write the name file and every package file to the workspace.
    ///
    /// Nothing is written when validation fails. Returns the paths written, name file first.
    pub fn write_input(&self) -> Result<Vec<PathBuf>> {
        self.validate()?;
        let ctx = self.context()?;
        fs::create_dir_all(&self.workspace)?;

        let mut written = vec![self.write_file(&format!("{}.nam", self.name), |out| {
            self.write_name_file(out)
        })?];
        for package in self.all_packages() {
            written.push(self.write_file(&package.file_name(&self.name), |out| {
                package.write(&ctx, out)
            })?);
        }
        info!(
            "wrote {} input files for {} to {}",
            written.len(),
            self.name,
            self.workspace.display()
        );
        Ok(written)
    }

    fn resolved_exe(&self) -> PathBuf {
        // a relative path with a directory part is relative to where we are, not the workspace
        if self.exe.is_relative() && self.exe.components().count() > 1 {
            if let Ok(cwd) = std::env::current_dir() {
                return cwd.join(&self.exe);
            }
        }
        self.exe.clone()
    }

    /// Run the simulator on the written input files and wait for it to finish.
    ///
    /// The run is successful when the process reports normal termination. Only failing to
    /// launch the executable is an error here, use [`RunReport::check`] or
    /// [`Model::run_checked`] to fail on an unsuccessful run.
    pub fn run(&self) -> Result<RunReport> {
        let exe = self.resolved_exe();
        let nam = format!("{}.nam", self.name);
        info!("running {} {} in {}", exe.display(), nam, self.workspace.display());
        let output = Command::new(&exe)
            .arg(&nam)
            .current_dir(&self.workspace)
            .output()
            .map_err(|source| ModflowError::Launch {
                exe: exe.clone(),
                source,
            })?;

        let lines = |bytes: &[u8]| -> Vec<String> {
            String::from_utf8_lossy(bytes).lines().map(str::to_string).collect()
        };
        let stdout = lines(&output.stdout);
        let stderr = lines(&output.stderr);
        if !self.silent {
            for line in &stdout {
                info!("{}", line);
            }
        }
        for line in &stderr {
            warn!("{}", line);
        }

        let success = normal_termination(&stdout);
        if !success {
            warn!(
                "{} did not terminate normally (exit status {:?})",
                self.name,
                output.status.code()
            );
        }
        Ok(RunReport {
            success,
            status: output.status.code(),
            stdout,
            stderr,
        })
    }

    pub fn run_checked(&self) -> Result<RunReport> {
        self.run()?.check()
    }
}
