//! Editing session: the current layout and which photo sits on which tile.

use log::{debug, warn};
use rand::Rng;

use crate::board::{Board, Layout, Tile};
use crate::canvas::CanvasSpec;
use crate::geometry::{Photo, PixelRect, Point};
use crate::viewport::{self, Anchor, ScaleDirection, Slice};
use crate::CollageError;

/// Tile reference valid for one layout only.
///
/// Regenerating or resizing the board invalidates every id handed out before.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId {
    index: usize,
    generation: u64,
}

impl TileId {
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Clone, Debug)]
struct Placement<P> {
    photo: P,
    slice: Option<Slice>,
}

/// Photo picked up from a tile and following the pointer.
#[derive(Clone, Debug)]
struct Drag<P> {
    photo: P,
    slice: Option<Slice>,
    anchor: Option<Anchor>,
    origin: usize,
    current: Option<usize>,
}

/// One source-to-destination copy of photo pixels.
#[derive(Debug)]
pub struct Blit<'a, P> {
    pub photo: &'a P,
    pub source: PixelRect,
    pub dest: PixelRect,
}

#[derive(Debug)]
pub enum DrawCommand<'a, P> {
    Clear { width: u32, height: u32 },
    StrokeTile(PixelRect),
    Blit(Blit<'a, P>),
    Highlight(PixelRect),
}

/// Complete redraw of the canvas.
#[derive(Debug)]
pub struct Frame<'a, P> {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand<'a, P>>,
}

impl<'a, P> Frame<'a, P> {
    pub fn blits(&self) -> impl Iterator<Item = &Blit<'a, P>> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Blit(blit) => Some(blit),
            _ => None,
        })
    }
}

/// Board, layout and photo placements of one collage.
#[derive(Debug)]
pub struct Collage<P> {
    canvas: CanvasSpec,
    multiplier: u32,
    layout: Layout,
    generation: u64,
    placements: Vec<Option<Placement<P>>>,
    highlighted: Option<usize>,
    drag: Option<Drag<P>>,
}

impl<P: Photo> Collage<P> {
    pub fn new<R: Rng + ?Sized>(
        canvas: CanvasSpec,
        multiplier: u32,
        rng: &mut R,
    ) -> Result<Self, CollageError> {
        let layout = canvas.board(multiplier)?.generate(rng);
        let placements = empty_placements(layout.len());

        Ok(Self {
            canvas,
            multiplier,
            layout,
            generation: 0,
            placements,
            highlighted: None,
            drag: None,
        })
    }

    pub fn canvas(&self) -> CanvasSpec {
        self.canvas
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn board(&self) -> &Board {
        self.layout.board()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tile_count(&self) -> usize {
        self.layout.len()
    }

    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.layout.len()).map(|index| self.id(index))
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.resolve(id).and_then(|index| self.layout.get(index))
    }

    pub fn tile_at(&self, point: Point) -> Option<TileId> {
        self.layout.tile_at(point).map(|index| self.id(index))
    }

    /// Replace the board with a fresh grid for a new canvas or tile multiplier.
    ///
    /// Every placement is dropped; the detached photos are returned.
    pub fn resize<R: Rng + ?Sized>(
        &mut self,
        canvas: CanvasSpec,
        multiplier: u32,
        rng: &mut R,
    ) -> Result<Vec<P>, CollageError> {
        let board = canvas.board(multiplier)?;

        self.cancel_drag();
        let detached = self.placements.drain(..).flatten().map(|placement| placement.photo);
        let detached: Vec<P> = detached.collect();

        self.canvas = canvas;
        self.multiplier = multiplier;
        self.install(board.generate(rng));
        self.placements = empty_placements(self.layout.len());

        Ok(detached)
    }

    /// New random layout on the same grid.
    ///
    /// Photos keep their tile index where it still exists, the rest move to the first
    /// empty tiles. Photos that no longer fit anywhere are returned.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<P> {
        self.cancel_drag();
        let layout = self.layout.board().generate(rng);
        let previous = std::mem::replace(&mut self.placements, empty_placements(layout.len()));
        self.install(layout);

        let mut overflow = Vec::new();
        for (index, placement) in previous.into_iter().enumerate() {
            let Some(placement) = placement else { continue };
            match self.placements.get_mut(index) {
                Some(slot) => *slot = Some(Placement { photo: placement.photo, slice: None }),
                None => overflow.push(placement.photo),
            }
        }

        let mut evicted = Vec::new();
        for photo in overflow {
            match self.first_free() {
                Some(index) => self.placements[index] = Some(Placement { photo, slice: None }),
                None => evicted.push(photo),
            }
        }

        if !evicted.is_empty() {
            warn!("{} photos no longer fit on the regenerated board", evicted.len());
        }

        evicted
    }

    pub fn image_at(&self, point: Point) -> Option<&P> {
        let index = self.layout.tile_at(point)?;
        self.placements[index].as_ref().map(|placement| &placement.photo)
    }

    pub fn image(&self, id: TileId) -> Option<&P> {
        let index = self.resolve(id)?;
        self.placements[index].as_ref().map(|placement| &placement.photo)
    }

    /// Current slice of the photo on `id`, if it has been drawn.
    pub fn slice(&self, id: TileId) -> Option<Slice> {
        let index = self.resolve(id)?;
        self.placements[index].as_ref().and_then(|placement| placement.slice)
    }

    /// Put `photo` on a tile, replacing any photo already there.
    ///
    /// A stale id, or the origin tile of an in-flight drag, hands the photo back.
    pub fn add_image_at(&mut self, id: TileId, photo: P) -> Result<(), P> {
        match self.resolve(id) {
            Some(index) if !self.is_reserved(index) => {
                self.placements[index] = Some(Placement { photo, slice: None });
                Ok(())
            },
            _ => Err(photo),
        }
    }

    pub fn remove_image_at(&mut self, id: TileId) -> Option<P> {
        let index = self.resolve(id)?;
        self.placements[index].take().map(|placement| placement.photo)
    }

    /// Place a newly decoded photo on the highlighted tile, or else on the first empty one.
    ///
    /// A full board hands the photo back.
    pub fn add_image(&mut self, photo: P) -> Result<TileId, P> {
        let target = match self.highlighted.take() {
            Some(index) if !self.is_reserved(index) => Some(index),
            _ => self.first_free(),
        };

        match target {
            Some(index) => {
                self.placements[index] = Some(Placement { photo, slice: None });
                Ok(self.id(index))
            },
            None => {
                debug!("no free tile left for photo");
                Err(photo)
            },
        }
    }

    pub fn clear_images(&mut self) {
        self.placements.iter_mut().for_each(|slot| *slot = None);
        self.drag = None;
    }

    pub fn highlighted(&self) -> Option<TileId> {
        self.highlighted.map(|index| self.id(index))
    }

    /// Highlight the tile under `point`. Returns `true` when the highlight moved.
    pub fn highlight_tile_at(&mut self, point: Point) -> bool {
        match self.layout.tile_at(point) {
            Some(index) if self.highlighted != Some(index) => {
                self.highlighted = Some(index);
                true
            },
            _ => false,
        }
    }

    pub fn clear_highlight(&mut self) -> bool {
        self.highlighted.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pick up the photo under `point`, keeping its slice so the drag can pan it.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(index) = self.layout.tile_at(point) else { return false };
        let Some(placement) = self.placements[index].take() else { return false };

        self.drag = Some(Drag {
            anchor: placement.slice.map(|slice| slice.anchor(point)),
            photo: placement.photo,
            slice: placement.slice,
            origin: index,
            current: Some(index),
        });
        true
    }

    /// Follow the pointer. Within the same tile the photo pans; entering another tile
    /// previews the photo there with a fresh crop.
    ///
    /// Returns `true` when the canvas needs a redraw.
    pub fn drag_to(&mut self, point: Point) -> bool {
        let target = self.layout.tile_at(point);
        let Some(drag) = self.drag.as_mut() else { return false };

        if target != drag.current {
            drag.current = target;
            drag.slice = None;
            drag.anchor = None;
            return true;
        }

        let (Some(slice), Some(anchor)) = (drag.slice, drag.anchor) else { return false };
        let panned = viewport::pan(slice, drag.photo.size(), anchor, point);
        drag.slice = Some(panned);
        panned != slice
    }

    /// Drop the dragged photo on the tile under `point`.
    ///
    /// A photo already on that tile swaps over to the origin tile. Dropping off the board
    /// returns the photo to where it came from.
    pub fn end_drag(&mut self, point: Point) -> bool {
        let Some(drag) = self.drag.take() else { return false };

        match self.layout.tile_at(point) {
            Some(target) => {
                let slice = if drag.current == Some(target) { drag.slice } else { None };
                if target != drag.origin {
                    if let Some(displaced) = self.placements[target].take() {
                        self.placements[drag.origin] =
                            Some(Placement { photo: displaced.photo, slice: None });
                    }
                }
                self.placements[target] = Some(Placement { photo: drag.photo, slice });
            },
            None => {
                self.placements[drag.origin] = Some(Placement { photo: drag.photo, slice: None });
            },
        }
        true
    }

    /// Abort the drag, putting the photo back on its origin tile with a fresh crop.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else { return false };
        self.placements[drag.origin] = Some(Placement { photo: drag.photo, slice: None });
        true
    }

    /// Step the zoom of the photo under `point`. Returns `true` when the slice changed.
    pub fn zoom_at(&mut self, point: Point, direction: ScaleDirection) -> bool {
        let Some(index) = self.layout.tile_at(point) else { return false };
        let Some(placement) = self.placements[index].as_mut() else { return false };
        let Some(slice) = placement.slice else { return false };

        match viewport::zoom(slice, placement.photo.size(), direction) {
            Some(zoomed) => {
                placement.slice = Some(zoomed);
                true
            },
            None => false,
        }
    }

    /// Append the blit for the photo on `id`, if there is one.
    ///
    /// Returns `false` when the id belongs to an earlier layout.
    pub fn draw_image<'a>(&'a self, id: TileId, out: &mut Vec<DrawCommand<'a, P>>) -> bool {
        match self.resolve(id) {
            Some(index) => self.draw_tile(index, out),
            None => false,
        }
    }

    /// Build a full redraw: clear, tile grid, photos, drag preview, highlight.
    ///
    /// Photos that have not been drawn yet get their default crop here.
    pub fn frame(&mut self) -> Frame<'_, P> {
        self.settle_slices();

        let this = &*self;
        let mut commands = Vec::with_capacity(1 + this.layout.len() * 2);
        commands.push(DrawCommand::Clear { width: this.canvas.width, height: this.canvas.height });
        commands.extend(this.layout.tiles().iter().map(|tile| DrawCommand::StrokeTile(tile.rect)));

        let mut index = 0;
        while this.draw_tile(index, &mut commands) {
            index += 1;
        }

        if let Some(drag) = &this.drag {
            if let (Some(_), Some(slice)) = (drag.current, drag.slice) {
                commands.push(DrawCommand::Blit(Blit {
                    photo: &drag.photo,
                    source: slice.source,
                    dest: slice.dest,
                }));
            }
        }

        if let Some(tile) = this.highlighted.and_then(|index| this.layout.get(index)) {
            commands.push(DrawCommand::Highlight(tile.rect));
        }

        Frame { width: this.canvas.width, height: this.canvas.height, commands }
    }

    /// Returns `false` only when `index` is past the last tile.
    fn draw_tile<'a>(&'a self, index: usize, out: &mut Vec<DrawCommand<'a, P>>) -> bool {
        let Some(tile) = self.layout.get(index) else { return false };
        if let Some(placement) = &self.placements[index] {
            let slice =
                placement.slice.unwrap_or_else(|| viewport::fit(tile.rect, placement.photo.size()));
            out.push(DrawCommand::Blit(Blit {
                photo: &placement.photo,
                source: slice.source,
                dest: slice.dest,
            }));
        }
        true
    }

    fn settle_slices(&mut self) {
        let layout = &self.layout;
        for (tile, slot) in layout.tiles().iter().zip(self.placements.iter_mut()) {
            if let Some(placement) = slot {
                let size = placement.photo.size();
                placement.slice.get_or_insert_with(|| viewport::fit(tile.rect, size));
            }
        }

        if let Some(drag) = self.drag.as_mut() {
            if let Some(tile) = drag.current.and_then(|index| layout.get(index)) {
                let size = drag.photo.size();
                drag.slice.get_or_insert_with(|| viewport::fit(tile.rect, size));
            }
        }
    }

    fn install(&mut self, layout: Layout) {
        self.layout = layout;
        self.generation += 1;
        self.highlighted = None;
        debug!("installed layout generation {} with {} tiles", self.generation, self.layout.len());
    }

    fn id(&self, index: usize) -> TileId {
        TileId { index, generation: self.generation }
    }

    fn resolve(&self, id: TileId) -> Option<usize> {
        (id.generation == self.generation && id.index < self.layout.len()).then_some(id.index)
    }

    /// Origin tile of an in-flight drag; the photo returns there if the drag is aborted.
    fn is_reserved(&self, index: usize) -> bool {
        self.drag.as_ref().is_some_and(|drag| drag.origin == index)
    }

    fn first_free(&self) -> Option<usize> {
        (0..self.placements.len())
            .find(|&index| self.placements[index].is_none() && !self.is_reserved(index))
    }
}

fn empty_placements<P>(len: usize) -> Vec<Option<Placement<P>>> {
    std::iter::repeat_with(|| None).take(len).collect()
}
