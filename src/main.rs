use anyhow::Result;
use clap::Parser;

use pipeline_failure_enrichment::cli::{normalize, Cli, EnvelopeMode};
use pipeline_failure_enrichment::clients::build_collaborators;
use pipeline_failure_enrichment::enrichment::identity::IdentityDirectory;
use pipeline_failure_enrichment::envelope::is_envelope;
use pipeline_failure_enrichment::{logging, util, Enricher};

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Phase 1: normalize CLI and install logging
  let cfg = normalize(cli)?;
  logging::init(&cfg.log_level, cfg.log_format);

  // Phase 2: read the inbound document and wire collaborators
  let input = util::read_input(&cfg.event)?;
  let enricher = Enricher::new(build_collaborators(&cfg), IdentityDirectory::builtin(), cfg.settings());
  let ctx = cfg.context();

  // Phase 3: enrich (unwrapping a queue envelope when asked or detected)
  let wrapped = match cfg.envelope {
    EnvelopeMode::Sqs => true,
    EnvelopeMode::Direct => false,
    EnvelopeMode::Auto => is_envelope(&input),
  };

  let enriched = if wrapped {
    enricher.enrich_sqs_event(input, &ctx)?
  } else {
    enricher.enrich_codepipeline_event(input, &ctx)?
  };

  util::write_output(&cfg.out, &enriched)
}
