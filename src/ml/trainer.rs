// ============================================================
// Layer 5 — Adversarial Training Loop
// ============================================================
// Alternating GAN updates using Burn's DataLoader and two Adam
// optimisers, one per network.
//
// Per training batch:
//   1. Discriminator step
//        fake = G(z).detach()          — no gradient into G
//        loss = BCE(D(x), 1) + BCE(D(fake), 0)
//        update D only
//   2. Generator step (fresh noise)
//        loss = BCE(D(G(z)), 1)
//        update G only
//
// After every epoch the inner (non-autodiff) models are
// evaluated on the test set: dropout is off and no graph is
// recorded.
//
// Key Burn insights:
//   - Training uses TrainBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns the model on the inner backend
//   - The test batcher must therefore use the inner backend
//   - GradientsParams::from_grads(grads, &module) only keeps the
//     gradients of that module's parameters, which is what
//     confines each step to one network
//
// Reference: Burn Book §5, Goodfellow et al. (2014),
//            Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::Dataset,
    },
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::{ImageBatch, ImageBatcher},
    dataset::ImageSample,
    noise::sample_noise,
};
use crate::domain::{
    confidence::{ConfidenceTrace, EpochConfidence, EpochLosses},
    traits::ImageSink,
};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::loss::{discriminator_loss, generator_loss};
use crate::ml::model::{gan_configs, Discriminator, Generator};
use crate::ml::sampler::Sampler;

pub type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;
pub type EvalBackend  = burn::backend::Wgpu;

/// The two players, always moved around together.
#[derive(Debug)]
pub struct GanModels<B: Backend> {
    pub generator:     Generator<B>,
    pub discriminator: Discriminator<B>,
}

impl<B: AutodiffBackend> GanModels<B> {
    /// Inner-backend copies with autodiff (and therefore dropout) disabled
    pub fn valid(&self) -> GanModels<B::InnerBackend> {
        GanModels {
            generator:     self.generator.valid(),
            discriminator: self.discriminator.valid(),
        }
    }
}

/// Files and sinks the loop reports into.
pub struct TrainingSinks<'a> {
    pub checkpoints: &'a CheckpointManager,
    pub metrics:     &'a MetricsLogger,
    pub images:      &'a dyn ImageSink,
}

/// What a finished run hands back for the final report.
pub struct TrainingOutcome<B: Backend> {
    pub sampler: Sampler<B>,
    pub trace:   ConfidenceTrace,
}

pub fn run_training<DTrain, DTest>(
    cfg:           &TrainConfig,
    train_dataset: DTrain,
    test_dataset:  DTest,
    sinks:         TrainingSinks<'_>,
) -> Result<TrainingOutcome<EvalBackend>>
where
    DTrain: Dataset<ImageSample> + 'static,
    DTest:  Dataset<ImageSample> + 'static,
{
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop::<TrainBackend, _, _>(cfg, train_dataset, test_dataset, sinks, device)
}

pub fn train_loop<B, DTrain, DTest>(
    cfg:           &TrainConfig,
    train_dataset: DTrain,
    test_dataset:  DTest,
    sinks:         TrainingSinks<'_>,
    device:        B::Device,
) -> Result<TrainingOutcome<B::InnerBackend>>
where
    B:      AutodiffBackend,
    DTrain: Dataset<ImageSample> + 'static,
    DTest:  Dataset<ImageSample> + 'static,
{
    B::seed(cfg.seed);

    // ── Build models ──────────────────────────────────────────────────────────
    let (g_cfg, d_cfg) = gan_configs(cfg.d_noise, cfg.d_hidden, cfg.dropout);
    let mut models = GanModels::<B> {
        generator:     g_cfg.init(&device),
        discriminator: d_cfg.init(&device),
    };
    tracing::info!(
        "Models ready: d_noise={}, d_hidden={}, G params={}, D params={}",
        cfg.d_noise, cfg.d_hidden,
        models.generator.num_params(),
        models.discriminator.num_params(),
    );

    // ── One Adam per player ───────────────────────────────────────────────────
    let mut g_optim = AdamConfig::new().init::<B, Generator<B>>();
    let mut d_optim = AdamConfig::new().init::<B, Discriminator<B>>();

    // ── Training data loader (AutodiffBackend, shuffled) ──────────────────────
    let train_loader = DataLoaderBuilder::new(ImageBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(cfg.num_workers)
        .build(train_dataset);

    // ── Test data loader (InnerBackend, fixed order) ──────────────────────────
    let test_loader = DataLoaderBuilder::new(ImageBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(cfg.num_workers)
        .build(test_dataset);

    let mut trace = ConfidenceTrace::new();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let (trained, losses) = run_epoch(
            models, &mut g_optim, &mut d_optim, train_loader.as_ref(), cfg, &device,
        );
        models = trained;

        let valid = models.valid();
        let (p_real, p_fake) = evaluate(&valid, test_loader.as_ref(), cfg.d_noise, &device);
        let confidence = EpochConfidence::new(epoch, p_real, p_fake);
        trace.push(confidence)?;

        tracing::info!(
            "Epoch {:>3}/{} | d_loss={:.4} | g_loss={:.4} | p_real={:.4} | p_fake={:.4}",
            epoch, cfg.epochs, losses.d_loss, losses.g_loss, p_real, p_fake,
        );

        sinks.metrics.log(&EpochMetrics::new(&losses, &confidence))?;
        sinks.checkpoints.save_models(&models, epoch)?;

        if epoch % cfg.report_every == 0 {
            println!(
                "(epoch {}/{}) p_real: {:.6}, p_g: {:.6}",
                epoch, cfg.epochs, p_real, p_fake,
            );
            let sampler = Sampler::new(valid.generator, cfg.d_noise, device.clone());
            let path = sinks
                .images
                .write_grid(&format!("samples_epoch_{epoch}"), &sampler.generate(cfg.sample_count)?)?;
            tracing::info!("Wrote samples to '{}'", path.display());
        }
    }

    tracing::info!("Training complete after {} epochs", trace.len());
    Ok(TrainingOutcome {
        sampler: Sampler::new(models.generator.valid(), cfg.d_noise, device),
        trace,
    })
}

/// One full pass over the training loader.
/// Takes the models by value because Burn optimisers consume and return them.
pub fn run_epoch<B, OG, OD>(
    mut models: GanModels<B>,
    g_optim:    &mut OG,
    d_optim:    &mut OD,
    loader:     &dyn DataLoader<ImageBatch<B>>,
    cfg:        &TrainConfig,
    device:     &B::Device,
) -> (GanModels<B>, EpochLosses)
where
    B:  AutodiffBackend,
    OG: Optimizer<Generator<B>, B>,
    OD: Optimizer<Discriminator<B>, B>,
{
    let mut d_loss_sum = 0.0f64;
    let mut g_loss_sum = 0.0f64;
    let mut batches    = 0usize;

    for batch in loader.iter() {
        // The last batch can be short; noise always matches the real batch.
        let n = batch.len();
        if batch.is_empty() {
            continue;
        }

        // ── Discriminator step ────────────────────────────────────────────────
        let fake = models
            .generator
            .forward(sample_noise::<B>(n, cfg.d_noise, device))
            .detach();
        let real_logits = models.discriminator.forward_logits(batch.images);
        let fake_logits = models.discriminator.forward_logits(fake);
        let d_loss      = discriminator_loss(real_logits, fake_logits);
        d_loss_sum += d_loss.clone().into_scalar().elem::<f64>();

        let grads = d_loss.backward();
        let grads = GradientsParams::from_grads(grads, &models.discriminator);
        models.discriminator = d_optim.step(cfg.lr, models.discriminator, grads);

        // ── Generator step ────────────────────────────────────────────────────
        let fake        = models.generator.forward(sample_noise::<B>(n, cfg.d_noise, device));
        let fake_logits = models.discriminator.forward_logits(fake);
        let g_loss      = generator_loss(fake_logits);
        g_loss_sum += g_loss.clone().into_scalar().elem::<f64>();

        let grads = g_loss.backward();
        let grads = GradientsParams::from_grads(grads, &models.generator);
        models.generator = g_optim.step(cfg.lr, models.generator, grads);

        batches += 1;
    }

    let mean = |sum: f64| if batches > 0 { sum / batches as f64 } else { f64::NAN };
    let losses = EpochLosses { d_loss: mean(d_loss_sum), g_loss: mean(g_loss_sum) };
    (models, losses)
}

/// Average discriminator confidence over the whole test loader:
///   p_real = Σ D(x) / N,  p_fake = Σ D(G(z)) / N
/// with one noise vector per test image. Returns (0, 0) for an empty loader.
pub fn evaluate<B: Backend>(
    models:  &GanModels<B>,
    loader:  &dyn DataLoader<ImageBatch<B>>,
    d_noise: usize,
    device:  &B::Device,
) -> (f64, f64) {
    let mut p_real_sum = 0.0f64;
    let mut p_fake_sum = 0.0f64;
    let mut total      = 0usize;

    for batch in loader.iter() {
        let n = batch.len();

        p_real_sum += models
            .discriminator
            .forward(batch.images)
            .sum()
            .into_scalar()
            .elem::<f64>();

        let fake = models.generator.forward(sample_noise::<B>(n, d_noise, device));
        p_fake_sum += models
            .discriminator
            .forward(fake)
            .sum()
            .into_scalar()
            .elem::<f64>();

        total += n;
    }

    if total == 0 {
        return (0.0, 0.0);
    }
    (p_real_sum / total as f64, p_fake_sum / total as f64)
}
