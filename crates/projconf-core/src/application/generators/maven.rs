//! Maven artifacts: `pom.xml` and GitHub Actions workflows.

use super::marker;
use crate::domain::{Emitter, MavenDependency, MavenEntry, Registry};
use crate::error::ProjconfResult;

pub fn build_workflow(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    out.lines(&format!(
        "
        # {}
        name: build
        on:
          push:
            branches:
              - master
        jobs:
          build:
            runs-on: ubuntu-latest
            steps:
              - uses: actions/checkout@v2
              - uses: actions/setup-java@v2
                with:
                  distribution: temurin
                  java-version: {}
                  cache: maven
              - name: Maven
        ",
        marker(r)?,
        r.text("jdk_version")?,
    ));

    let coverage = r.flag("test_coverage")?;
    let mut args = vec!["install"];
    if coverage {
        // Report is uploaded to Codecov below.
        args.push("jacoco:report");
    }
    if r.flag("maven_central")? {
        // CI has no release signing key.
        args.push("-Dgpg.skip=true");
    }
    if r.flag("has_javadoc")? {
        args.push("-Dmaven.javadoc.failOnWarnings=true");
    }
    out.line(format!("        run: mvn {} -B -V", args.join(" ")));
    if coverage {
        out.line("      - uses: codecov/codecov-action@v2");
    }
    Ok(())
}

/// Release workflow, triggered remotely with `workflow_dispatch`.
pub fn maven_release_workflow(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    out.lines(&format!(
        r#"
        # {}
        name: release
        on: workflow_dispatch
        jobs:
          release:
            runs-on: ubuntu-latest
            steps:
              - uses: actions/checkout@v2
              - uses: actions/setup-java@v2
                with:
                  distribution: temurin
                  java-version: {}
                  server-id: ossrh
                  server-username: MAVEN_USERNAME
                  server-password: MAVEN_PASSWORD
                  cache: maven
              - name: Import GPG key
                run: |
                  mkdir -p ~/.gnupg/
                  printf "$MAVEN_SIGNING_KEY" | base64 --decode > ~/.gnupg/maven-signing-key.gpg
                  gpg --import ~/.gnupg/maven-signing-key.gpg
                env:
                  MAVEN_SIGNING_KEY: ${{{{ secrets.MAVEN_SIGNING_KEY }}}}
              - name: Maven
                run: mvn -B -V deploy
                env:
                  MAVEN_USERNAME: ${{{{ secrets.MAVEN_USERNAME }}}}
                  MAVEN_PASSWORD: ${{{{ secrets.MAVEN_PASSWORD }}}}
        "#,
        marker(r)?,
        r.text("jdk_version")?,
    ));
    Ok(())
}

pub fn pom(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    let open = r.flag("is_opensource")?;

    out.xml_tabs(
        0,
        &format!(
            r#"
            <!-- {} -->
            <project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
                <modelVersion>4.0.0</modelVersion>

                <groupId>{}</groupId>
                <artifactId>{}</artifactId>
                <version>{}</version>

                <name>{}</name>
            "#,
            marker(r)?,
            r.text("pom_group")?,
            r.text("pom_artifact")?,
            r.text("pom_version")?,
            r.text("pom_name")?,
        ),
    );
    out.blank();
    if r.flag("has_website")? {
        out.xml_tabs(1, &format!("<url>{}</url>", r.text("homepage")?));
    }
    if let Some(description) = r.opt_text("pom_description")? {
        out.xml_tabs(1, &format!("<description>{description}</description>"));
    }
    out.xml_tabs(
        1,
        &format!("<inceptionYear>{}</inceptionYear>", r.text("inception_year")?),
    );

    if open {
        out.blank().xml_tabs(
            1,
            &format!(
                "
                <licenses>
                    <license>
                        <name>{}</name>
                        <url>{}</url>
                    </license>
                </licenses>
                ",
                r.text("license_id")?,
                r.text("license_url")?,
            ),
        );
    }

    let author = r.text("author_name")?;
    let author_url = r.text("author_url")?;
    out.blank().xml_tabs(
        1,
        &format!(
            "
            <organization>
                <name>{author}</name>
                <url>{author_url}</url>
            </organization>
            <developers>
                <developer>
                    <name>{author}</name>
                    <email>{}</email>
                    <url>{author_url}</url>
                </developer>
            </developers>
            ",
            r.text("author_email")?,
        ),
    );

    if open {
        let scm = r.text("scm_connection")?;
        out.blank().xml_tabs(
            1,
            &format!(
                "
                <scm>
                    <connection>{scm}</connection>
                    <developerConnection>{scm}</developerConnection>
                    <url>{}</url>
                </scm>
                ",
                r.text("repository_url")?,
            ),
        );
    }

    out.blank().xml_tabs(
        1,
        &format!(
            "
            <properties>
                <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
                <maven.compiler.release>{}</maven.compiler.release>
            </properties>

            <dependencies>
            ",
            r.text("jdk_version")?,
        ),
    );
    for spec in r.list("dependencies")? {
        match MavenEntry::parse(&spec)? {
            MavenEntry::Raw(xml) => {
                out.xml_tabs(2, &xml);
            }
            MavenEntry::Coordinates(dependency) => dependency_xml(&dependency, out),
        }
    }
    out.xml_tabs(
        1,
        "
        </dependencies>

        <build>
            <plugins>
                <plugin>
                    <artifactId>maven-compiler-plugin</artifactId>
                    <version>3.8.1</version>
        ",
    );

    let preview = r.flag("jdk_preview")?;
    let parameter_names = r.flag("jdk_parameter_names")?;
    if preview || parameter_names {
        out.xml_tabs(4, "<configuration>");
        out.xml_tabs(5, "<compilerArgs>");
        if preview {
            out.xml_tabs(6, "<compilerArg>--enable-preview</compilerArg>");
        }
        if parameter_names {
            out.xml_tabs(6, "<compilerArg>-parameters</compilerArg>");
        }
        out.xml_tabs(5, "</compilerArgs>");
        out.xml_tabs(4, "</configuration>");
    }
    out.xml_tabs(
        3,
        "
        </plugin>
        <plugin>
            <artifactId>maven-surefire-plugin</artifactId>
            <version>3.0.0-M5</version>
        ",
    );
    if preview {
        out.xml_tabs(
            4,
            "
            <configuration>
                <argLine>--enable-preview</argLine>
            </configuration>
            ",
        );
    }
    out.xml_tabs(3, "</plugin>");

    if r.flag("test_coverage")? {
        jacoco_plugin(out);
    }
    if r.flag("has_javadoc")? {
        javadoc_plugin(&r.list("javadoc_links")?, out);
    }
    if r.flag("maven_central")? {
        release_plugins(out);
    }

    out.xml_tabs(
        0,
        "
                </plugins>
            </build>
        </project>
        ",
    );
    Ok(())
}

fn dependency_xml(dependency: &MavenDependency, out: &mut Emitter) {
    out.xml_tabs(
        2,
        &format!(
            "
            <dependency>
                <groupId>{}</groupId>
                <artifactId>{}</artifactId>
                <version>{}</version>
            ",
            dependency.group, dependency.artifact, dependency.version,
        ),
    );
    if let Some(scope) = &dependency.scope {
        out.xml_tabs(3, &format!("<scope>{scope}</scope>"));
    }
    if !dependency.exclusions.is_empty() {
        out.xml_tabs(3, "<exclusions>");
        for exclusion in &dependency.exclusions {
            out.xml_tabs(
                4,
                &format!(
                    "
                    <exclusion>
                        <groupId>{}</groupId>
                        <artifactId>{}</artifactId>
                    </exclusion>
                    ",
                    exclusion.group, exclusion.artifact,
                ),
            );
        }
        out.xml_tabs(3, "</exclusions>");
    }
    out.xml_tabs(2, "</dependency>");
}

fn jacoco_plugin(out: &mut Emitter) {
    out.xml_tabs(
        3,
        "
        <plugin>
            <groupId>org.jacoco</groupId>
            <artifactId>jacoco-maven-plugin</artifactId>
            <version>0.8.7</version>
            <executions>
                <execution>
                    <id>prepare-agent</id>
                    <goals>
                        <goal>prepare-agent</goal>
                    </goals>
                </execution>
                <execution>
                    <id>report</id>
                    <phase>test</phase>
                    <goals>
                        <goal>report</goal>
                    </goals>
                </execution>
            </executions>
        </plugin>
        ",
    );
}

fn javadoc_plugin(links: &[String], out: &mut Emitter) {
    out.xml_tabs(
        3,
        "
        <plugin>
            <groupId>org.apache.maven.plugins</groupId>
            <artifactId>maven-javadoc-plugin</artifactId>
            <version>3.2.0</version>
            <configuration>
                <notimestamp>true</notimestamp>
                <bottom>
                    <![CDATA[<!-- No copyright message. -->]]>
                </bottom>
        ",
    );
    // Explicit list; detectLinks breaks CI builds that fail on javadoc warnings.
    if !links.is_empty() {
        out.xml_tabs(5, "<links>");
        for link in links {
            out.xml_tabs(6, &format!("<link>{link}</link>"));
        }
        out.xml_tabs(5, "</links>");
    }
    out.xml_tabs(
        3,
        "
            </configuration>
            <executions>
                <execution>
                    <id>attach-javadocs</id>
                    <goals>
                        <goal>jar</goal>
                    </goals>
                </execution>
            </executions>
        </plugin>
        ",
    );
}

/// Source, staging and signing plugins required by Maven Central.
fn release_plugins(out: &mut Emitter) {
    out.xml_tabs(
        3,
        "
        <plugin>
            <groupId>org.apache.maven.plugins</groupId>
            <artifactId>maven-source-plugin</artifactId>
            <version>3.0.1</version>
            <executions>
                <execution>
                    <id>attach-sources</id>
                    <goals>
                        <goal>jar-no-fork</goal>
                    </goals>
                </execution>
            </executions>
        </plugin>
        <plugin>
            <groupId>org.sonatype.plugins</groupId>
            <artifactId>nexus-staging-maven-plugin</artifactId>
            <version>1.6.8</version>
            <extensions>true</extensions>
            <configuration>
                <serverId>ossrh</serverId>
                <nexusUrl>https://oss.sonatype.org/</nexusUrl>
                <autoReleaseAfterClose>true</autoReleaseAfterClose>
            </configuration>
        </plugin>
        <plugin>
            <groupId>org.apache.maven.plugins</groupId>
            <artifactId>maven-gpg-plugin</artifactId>
            <version>1.6</version>
            <executions>
                <execution>
                    <id>sign-artifacts</id>
                    <phase>verify</phase>
                    <goals>
                        <goal>sign</goal>
                    </goals>
                </execution>
            </executions>
        </plugin>
        ",
    );
}
