//! Benchmark submission packaging script.

use super::marker;
use crate::domain::{Emitter, Registry};
use crate::error::ProjconfResult;

/// `scripts/publish.sh`: publish for win-x86 and zip the submission.
pub fn publish_script(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    out.line("#!/bin/sh -e")
        .line(format!("# {}", marker(r)?))
        .line("cd `dirname $0`/..")
        .line("dotnet publish -c release -r win-x86");

    if r.flag("has_submission_zip")? {
        let namespace = r.text("root_namespace")?;
        let zip = r.text("submission_zip")?;
        let staging = format!("{namespace}/bin/submission");
        out.line(format!("rm -rf {namespace}/bin/{{submission,{zip}}}"))
            .line(format!("mkdir -p {staging}"));
        for project in r.list("bundled_sister_projects")? {
            out.line(format!(
                "cp ../{project}/*/bin/Release/net*/win-x86/publish/* {staging}/"
            ));
        }
        out.line(format!("cp */bin/Release/net*/win-x86/publish/* {staging}/"))
            .line(format!("cd {staging}"))
            .line(format!("zip ../{zip} *"));
    }
    Ok(())
}
