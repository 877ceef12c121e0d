//! .NET artifacts: project files, solution and release workflow.

use uuid::Uuid;

use super::marker;
use crate::domain::{Emitter, NugetPackage, Registry};
use crate::error::ProjconfResult;

pub fn dotnet_release_workflow(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    out.lines(&format!(
        "
        # {}
        name: release
        on: workflow_dispatch
        jobs:
          release:
            uses: {}/.github/workflows/net-release.yml@master
            with:
              dotnet-version: {}.x
            secrets:
              nuget-token: ${{{{ secrets.NUGET_TOKEN }}}}
        ",
        marker(r)?,
        r.text("shared_workflows_repository")?,
        r.text("target_framework")?,
    ));
    Ok(())
}

pub fn csproj(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    let repository = r.text("repository_url")?;
    let project_url = if r.flag("has_website")? {
        r.text("homepage")?
    } else {
        repository.clone()
    };
    out.lines(&format!(
        r#"
        <!-- {} -->
        <Project Sdk="Microsoft.NET.Sdk">
          <PropertyGroup>
            <TargetFramework>net{}</TargetFramework>
            <Version>{}</Version>
            <Authors>{}</Authors>
            <Title>{}</Title>
            <PackageProjectUrl>{project_url}</PackageProjectUrl>
            <RepositoryUrl>{repository}.git</RepositoryUrl>
        "#,
        marker(r)?,
        r.text("target_framework")?,
        r.text("project_version")?,
        r.text("code_owner")?,
        r.text("nuget_title")?,
    ));
    if let Some(license) = r.opt_text("license_id")? {
        out.xml_spaces(
            2,
            &format!("<PackageLicenseExpression>{license}</PackageLicenseExpression>"),
        );
    }
    out.xml_spaces(
        2,
        "
        <GenerateDocumentationFile>true</GenerateDocumentationFile>
        <PackageReadmeFile>README.md</PackageReadmeFile>
        ",
    );
    if let Some(assembly) = r.opt_text("assembly_name")? {
        out.xml_spaces(2, &format!("<AssemblyName>{assembly}</AssemblyName>"));
    }
    if let Some(description) = r.opt_text("nuget_description")? {
        out.xml_spaces(2, &format!("<Description>{description}</Description>"));
    }
    if let Some(tags) = r.opt_text("nuget_tags")? {
        out.xml_spaces(2, &format!("<PackageTags>{tags}</PackageTags>"));
    }
    let icon = r.opt_text("nuget_icon")?;
    if let Some(icon) = &icon {
        out.xml_spaces(2, &format!("<PackageIcon>{icon}</PackageIcon>"));
    }
    out.xml_spaces(
        1,
        r#"
        </PropertyGroup>
        <ItemGroup>
          <None Include="../README.md" Pack="true" PackagePath="/" />
        "#,
    );
    if let Some(icon) = &icon {
        out.xml_spaces(
            2,
            &format!(r#"<None Include="{icon}" Pack="true" PackagePath="/" />"#),
        );
    }
    out.xml_spaces(1, "</ItemGroup>");

    let dependencies = r.list("dependencies")?;
    if !dependencies.is_empty() {
        out.xml_spaces(1, "<ItemGroup>");
        package_references(&dependencies, out)?;
        out.xml_spaces(1, "</ItemGroup>");
    }
    out.line("</Project>");
    Ok(())
}

pub fn test_csproj(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    let namespace = r.text("root_namespace")?;
    out.lines(&format!(
        r#"
        <!-- {} -->
        <Project Sdk="Microsoft.NET.Sdk">
          <PropertyGroup>
            <TargetFramework>net{}</TargetFramework>
            <IsPackable>false</IsPackable>
            <RootNamespace>{namespace}</RootNamespace>
          </PropertyGroup>
          <ItemGroup>
            <ProjectReference Include="../{namespace}/{namespace}.csproj" />
          </ItemGroup>
          <ItemGroup>
        "#,
        marker(r)?,
        r.text("target_framework")?,
    ));
    package_references(&r.list("test_dependencies")?, out)?;
    out.xml_spaces(
        0,
        "
          </ItemGroup>
        </Project>
        ",
    );
    Ok(())
}

fn package_references(specs: &[String], out: &mut Emitter) -> ProjconfResult<()> {
    for spec in specs {
        if spec.trim_start().starts_with('<') {
            out.xml_spaces(2, spec);
            continue;
        }
        let package = NugetPackage::parse(spec)?;
        out.xml_spaces(
            2,
            &format!(
                r#"<PackageReference Include="{}" Version="{}" />"#,
                package.name, package.version
            ),
        );
    }
    Ok(())
}

/// Stable GUID of a solution project.
///
/// Name-based (UUIDv5) chain: website domain → repository → project, so the
/// solution file does not churn between runs.
pub fn project_guid(r: &Registry, project: &str) -> ProjconfResult<Uuid> {
    let author = Uuid::new_v5(&Uuid::NAMESPACE_DNS, r.text("website_domain")?.as_bytes());
    let repository = Uuid::new_v5(&author, r.text("repository_name")?.as_bytes());
    Ok(Uuid::new_v5(&repository, project.as_bytes()))
}

pub fn solution(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    out.lines(&format!(
        "
        # {}
        Microsoft Visual Studio Solution File, Format Version 12.00
        ",
        marker(r)?,
    ));

    let projects = r.list("sln_projects")?;
    let guids = projects
        .iter()
        .map(|p| project_guid(r, p))
        .collect::<ProjconfResult<Vec<_>>>()?;

    for (project, guid) in projects.iter().zip(&guids) {
        out.lines(&format!(
            r#"
            Project("{{{guid}}}") = "{project}", "{project}/{project}.csproj", "{{{guid}}}"
            EndProject
            "#
        ));
    }
    out.xml_tabs(
        0,
        "
        Global
            GlobalSection(SolutionConfigurationPlatforms) = preSolution
                Debug|Any CPU = Debug|Any CPU
                Release|Any CPU = Release|Any CPU
            EndGlobalSection
            GlobalSection(ProjectConfigurationPlatforms) = postSolution
        ",
    );
    for guid in &guids {
        out.indented(
            &format!(
                "
                {{{guid}}}.Debug|Any CPU.ActiveCfg = Debug|Any CPU
                {{{guid}}}.Debug|Any CPU.Build.0 = Debug|Any CPU
                {{{guid}}}.Release|Any CPU.ActiveCfg = Release|Any CPU
                {{{guid}}}.Release|Any CPU.Build.0 = Release|Any CPU
                "
            ),
            "\t\t",
            0,
        );
    }
    out.xml_tabs(
        0,
        "
            EndGlobalSection
        EndGlobal
        ",
    );
    Ok(())
}
