use docopt::Docopt;
use log::info;
use perfect_mazes::{
    connectivity,
    generators::{self, Traversal},
    layout::SceneLayout,
    maze::Maze,
    renderers,
    units::{ColumnsCount, Height, RowsCount, Width},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Perfect mazes

Usage:
    maze_driver -h | --help
    maze_driver [--rows=<r> --columns=<c>] [--seed=<s>] [--call-stack] [text --text-out=<path>] [image --image-out=<path> --width=<w> --height=<h>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of cell rows in the maze [default: 10].
    --columns=<c>          Number of cell columns in the maze [default: 10].
    --seed=<s>             Seed the generator to get the same maze every time.
    --call-stack           Carve using plain recursion rather than an explicit stack. Mazes over 1024 cells fall back to the explicit stack.
    --text-out=<path>      Output file path for a textual rendering of the maze. Prints to stdout if not given.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format [default: maze.png].
    --width=<w>            Image width in pixels [default: 800].
    --height=<h>           Image height in pixels [default: 600].
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#cells) m(#passages). Line 2+ passage between cells. Uses 1-based row major cell indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_call_stack: bool,
    cmd_text: bool,
    flag_text_out: String,
    cmd_image: bool,
    flag_image_out: String,
    flag_width: u32,
    flag_height: u32,
    flag_save_edges: String,
}

mod errors {
    // Result is a typedef of std `Result` with the error type our own `Error`.
    // Library errors are linked so `?` keeps their kind; ResultExt adds `chain_err`.
    use error_chain::*;
    error_chain! {

        links {
            Maze(::perfect_mazes::errors::Error, ::perfect_mazes::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
            ImageWriteError(::image::ImageError);
        }
    }
}
use crate::errors::*;

// Failures print the readable error chain to stderr and exit with status 1.
error_chain::quick_main!(run);

fn run() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let maze = generate_maze(&args)?;
    info!("Generated a {} x {} maze with {} passages",
          maze.rows().0, maze.columns().0, maze.passages_count());

    // Text is the default when no render command is given
    let do_text_render = args.cmd_text || !args.cmd_image;

    if do_text_render {
        if args.flag_text_out.is_empty() {
            println!("{}", maze);
        } else {
            write_text_to_file(&format!("{}", maze), &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
            info!("Wrote maze text to {}", args.flag_text_out);
        }
    }

    if args.cmd_image {
        let layout = SceneLayout::new(&maze, Width(args.flag_width), Height(args.flag_height));
        renderers::save_png(&layout, &args.flag_image_out)
            .chain_err(|| format!("Failed to write maze image {}", args.flag_image_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        write_text_to_file(&connectivity::edge_list(&maze), &args.flag_save_edges)
            .chain_err(|| format!("Failed to write maze graph to text file {}",
                                  args.flag_save_edges))?;
        info!("Wrote maze edge list to {}", args.flag_save_edges);
    }

    Ok(())
}

fn generate_maze(maze_args: &MazeArgs) -> Result<Maze> {

    let rows = RowsCount(maze_args.flag_rows);
    let columns = ColumnsCount(maze_args.flag_columns);
    let traversal = if maze_args.flag_call_stack {
        Traversal::CallStack
    } else {
        Traversal::ExplicitStack
    };

    let maze = match maze_args.flag_seed {
        Some(seed) => {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            generators::recursive_backtracker_with_traversal(rows, columns, &mut rng, traversal)?
        }
        None => {
            let mut rng = rand::rng();
            generators::recursive_backtracker_with_traversal(rows, columns, &mut rng, traversal)?
        }
    };

    Ok(maze)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
