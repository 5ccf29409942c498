use std::io::Write;

use crate::error::Result;
use crate::packages::{ModelContext, Package, PackageKind, heading};

/// Preconditioned conjugate-gradient solver (`PCG`).
#[derive(Debug, Clone, PartialEq)]
pub struct Pcg {
    pub mxiter: u32,
    pub iter1: u32,
    /// 1 modified incomplete Cholesky, 2 polynomial.
    pub npcond: u32,
    pub hclose: f64,
    pub rclose: f64,
    pub relax: f64,
    pub nbpol: u32,
    pub iprpcg: u32,
    pub mutpcg: u32,
    pub damp: f64,
}

impl Default for Pcg {
    fn default() -> Self {
        Pcg {
            mxiter: 50,
            iter1: 30,
            npcond: 1,
            hclose: 1e-5,
            rclose: 1e-5,
            relax: 1.0,
            nbpol: 0,
            iprpcg: 0,
            mutpcg: 3,
            damp: 1.0,
        }
    }
}

impl Package for Pcg {
    fn kind(&self) -> PackageKind {
        PackageKind::Pcg
    }

    fn write(&self, _ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        heading(out, self.kind())?;
        writeln!(
            out,
            "{} {} {} # MXITER ITER1 NPCOND",
            self.mxiter, self.iter1, self.npcond
        )?;
        writeln!(
            out,
            "{:10.3E} {:10.3E} {:10.3E} {} {} {} {:10.3E} # HCLOSE RCLOSE RELAX NBPOL IPRPCG MUTPCG DAMP",
            self.hclose, self.rclose, self.relax, self.nbpol, self.iprpcg, self.mutpcg, self.damp
        )?;
        Ok(())
    }
}

/// Preset solver settings of the Newton solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NwtOptions {
    Simple,
    Moderate,
    #[default]
    Complex,
}

impl NwtOptions {
    fn keyword(self) -> &'static str {
        match self {
            NwtOptions::Simple => "SIMPLE",
            NwtOptions::Moderate => "MODERATE",
            NwtOptions::Complex => "COMPLEX",
        }
    }
}

/// Newton solver of MODFLOW-NWT (`NWT`).
#[derive(Debug, Clone, PartialEq)]
pub struct Nwt {
    pub headtol: f64,
    pub fluxtol: f64,
    pub maxiterout: u32,
    pub thickfact: f64,
    /// 1 GMRES, 2 XMD.
    pub linmeth: u32,
    pub iprnwt: u32,
    pub ibotav: u32,
    pub options: NwtOptions,
}

impl Default for Nwt {
    fn default() -> Self {
        Nwt {
            headtol: 1e-2,
            fluxtol: 500.0,
            maxiterout: 100,
            thickfact: 1e-5,
            linmeth: 1,
            iprnwt: 0,
            ibotav: 0,
            options: NwtOptions::default(),
        }
    }
}

impl Package for Nwt {
    fn kind(&self) -> PackageKind {
        PackageKind::Nwt
    }

    fn write(&self, _ctx: &ModelContext<'_>, out: &mut dyn Write) -> Result<()> {
        heading(out, self.kind())?;
        writeln!(
            out,
            "{:10.3E} {:10.3E} {} {:10.3E} {} {} {} {} # HEADTOL FLUXTOL MAXITEROUT THICKFACT LINMETH IPRNWT IBOTAV OPTIONS",
            self.headtol,
            self.fluxtol,
            self.maxiterout,
            self.thickfact,
            self.linmeth,
            self.iprnwt,
            self.ibotav,
            self.options.keyword()
        )?;
        Ok(())
    }
}
